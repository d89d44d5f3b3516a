use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserBrief;

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub credits: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn brief(&self) -> CourseBrief {
        CourseBrief {
            id: self.id,
            name: self.name.clone(),
            code: self.code.clone(),
        }
    }
}

// 嵌入在其他资源中的课程摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseBrief {
    pub id: i64,
    pub name: String,
    pub code: String,
}

// 带已选学生列表的课程
#[derive(Debug, Clone, Serialize)]
pub struct CourseWithStudents {
    #[serde(flatten)]
    pub course: Course,
    pub students: Vec<UserBrief>,
}
