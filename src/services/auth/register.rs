use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::PortalError;
use crate::models::auth::{requests::RegisterRequest, responses::AuthResponse};
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

use super::{AuthService, issue_token};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = register_request.email.trim().to_lowercase();
    let full_name = register_request.full_name.trim().to_string();

    // 1. 必填项与格式校验
    if email.is_empty() || register_request.password.is_empty() || full_name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "邮箱、密码和姓名均为必填项",
        )));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 2. 自助注册不能创建管理员
    let role = register_request.role.unwrap_or(UserRole::Student);
    if role == UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "不能自行注册管理员账号",
        )));
    }

    // 3. 邮箱唯一
    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "该邮箱已被注册",
        )));
    }

    // 4. 哈希密码并创建用户
    let create_request = CreateUserRequest {
        email,
        password: hash_password(&register_request.password)?,
        full_name,
        role,
        group_name: register_request.group_name,
        avatar_url: None,
    };

    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        // 并发注册同一邮箱
        Err(e @ PortalError::Conflict(_)) => {
            return Ok(crate::services::error_with_code(e, ErrorCode::UserEmailAlreadyExists));
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(&user)?;
    info!("User {} registered with role {}", user.id, user.role);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "注册成功".to_string(),
        user,
        token,
    }))
}
