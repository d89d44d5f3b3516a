use serde::Deserialize;

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub code: String,
    /// 缺省为 3 学分
    pub credits: Option<i32>,
}
