use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::auth::{requests::LoginRequest, responses::AuthResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::verify_password;

use super::{AuthService, issue_token};

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = login_request.email.trim().to_lowercase();
    if email.is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "邮箱和密码均为必填项",
        )));
    }

    // 未知邮箱与密码错误返回相同信息
    let user = match storage.get_user_by_email(&email).await? {
        Some(user) if verify_password(&login_request.password, &user.password_hash) => user,
        _ => {
            info!("Login failed for {}", email);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "邮箱或密码错误",
            )));
        }
    };

    let token = issue_token(&user)?;
    info!("User {} logged in successfully", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "登录成功".to_string(),
        user,
        token,
    }))
}
