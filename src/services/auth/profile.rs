use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, user_cache_key};
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

use super::AuthService;

pub async fn handle_get_profile(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    match storage.get_user_by_id(actor.id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if let Some(ref full_name) = update_data.full_name
        && full_name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "姓名不能为空")));
    }

    // 邮箱与角色不可修改
    let update = UpdateUserRequest {
        full_name: update_data.full_name.map(|n| n.trim().to_string()),
        group_name: update_data.group_name,
        avatar_url: update_data.avatar_url,
    };

    match storage.update_user(actor.id, update).await? {
        Some(user) => {
            // 缓存中的旧资料失效
            if let (Some(cache), Some(token)) = (service.get_cache(request), bearer_token(request)) {
                cache.remove(&user_cache_key(token)).await;
            }
            Ok(HttpResponse::Ok().json(user))
        }
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
    }
}
