use crate::models::users::entities::User;
use serde::Serialize;

// 注册/登录响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}
