use serde::Deserialize;

use super::entities::UserRole;

// 存储层创建用户请求（password 为已哈希的值）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub group_name: Option<String>,
    pub avatar_url: Option<String>,
}

// 存储层更新用户请求（不包含 email 与 role）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub group_name: Option<String>,
    pub avatar_url: Option<String>,
}
