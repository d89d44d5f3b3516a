use serde::{Deserialize, Serialize};

// 成绩实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub submission_id: Option<i64>,
    pub score: f64,
    pub max_score: i32,
    pub feedback: Option<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
