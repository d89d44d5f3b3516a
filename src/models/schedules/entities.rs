use serde::{Deserialize, Serialize};

// 课表条目，day_of_week 取值 0..=6（0 为周日），时间格式 HH:MM:SS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub classroom: Option<String>,
    pub group_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
