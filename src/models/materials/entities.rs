use serde::{Deserialize, Serialize};

// 资料类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    #[default]
    Document, // 文档
    Video, // 视频
    Link,  // 外部链接
    Other, // 其他
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialType::Document => write!(f, "document"),
            MaterialType::Video => write!(f, "video"),
            MaterialType::Link => write!(f, "link"),
            MaterialType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(MaterialType::Document),
            "video" => Ok(MaterialType::Video),
            "link" => Ok(MaterialType::Link),
            "other" => Ok(MaterialType::Other),
            _ => Err(format!("Invalid material type: {s}")),
        }
    }
}

// 课程资料实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub teacher_id: i64,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    /// 上传目录中的存储文件名，仅服务端使用
    #[serde(skip_serializing, default)]
    pub stored_name: Option<String>,
    pub file_size: Option<i64>,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
