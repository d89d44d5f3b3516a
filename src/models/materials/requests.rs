use serde::Deserialize;

use super::entities::MaterialType;

// 创建资料请求（JSON，外部链接形式）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    #[serde(rename = "type")]
    pub material_type: Option<MaterialType>,
    pub file_url: Option<String>,
}

// 更新资料请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<MaterialType>,
    pub file_url: Option<String>,
}

// 资料列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialListQuery {
    pub course_id: Option<i64>,
}

// 存储层新建资料请求
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub teacher_id: i64,
    pub material_type: MaterialType,
    pub file: Option<StoredFile>,
    pub file_url: Option<String>,
}

// 已落盘的上传文件信息
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub stored_name: String,
    pub original_name: String,
    pub size: i64,
}

impl StoredFile {
    pub fn public_url(&self) -> String {
        format!("/uploads/{}", self.stored_name)
    }
}
