use serde::{Deserialize, Serialize};

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub teacher_id: i64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_score: i32,
    pub attachments: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
