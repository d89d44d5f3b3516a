use serde::Deserialize;

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    /// 缺省为 100
    pub max_score: Option<i32>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListQuery {
    pub course_id: Option<i64>,
}

// 学生提交作业请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

// 教师评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmissionRequest {
    pub score: f64,
    /// 缺省时沿用已有成绩或作业的满分
    pub max_score: Option<i32>,
    pub feedback: Option<String>,
}
