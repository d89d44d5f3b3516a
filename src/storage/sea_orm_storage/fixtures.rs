//! 测试用数据构造

use super::SeaOrmStorage;
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;

pub(crate) async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("in-memory storage")
}

pub(crate) fn user_request(email: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password: "hashed".to_string(),
        full_name: email.split('@').next().unwrap_or(email).to_string(),
        role,
        group_name: None,
        avatar_url: None,
    }
}

pub(crate) async fn user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> User {
    storage
        .create_user(user_request(email, role))
        .await
        .expect("create user")
}

pub(crate) async fn course(storage: &SeaOrmStorage, code: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: format!("Course {code}"),
            description: None,
            code: code.to_string(),
            credits: None,
        })
        .await
        .expect("create course")
}

pub(crate) async fn assignment(
    storage: &SeaOrmStorage,
    course_id: i64,
    teacher_id: i64,
    max_score: i32,
) -> Assignment {
    storage
        .create_assignment(
            teacher_id,
            CreateAssignmentRequest {
                title: "Homework".to_string(),
                description: None,
                course_id,
                due_date: chrono::Utc::now() + chrono::Duration::days(7),
                max_score: Some(max_score),
                attachments: Vec::new(),
            },
        )
        .await
        .expect("create assignment")
}
