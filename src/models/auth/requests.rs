use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 用户注册请求（来自HTTP请求）
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    /// 缺省为 student
    pub role: Option<UserRole>,
    pub group_name: Option<String>,
}

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// 邮箱
    #[serde(default)]
    pub email: String,
    /// 密码
    #[serde(default)]
    pub password: String,
}

// 更新个人资料请求，邮箱与角色不可修改
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub group_name: Option<String>,
    pub avatar_url: Option<String>,
}
