use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, user_cache_key};
use crate::models::ApiResponse;

use super::AuthService;

/// 处理用户登出
/// 令牌本身无状态，登出只清除该令牌对应的用户缓存
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(cache), Some(token)) = (service.get_cache(request), bearer_token(request)) {
        cache.remove(&user_cache_key(token)).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("登出成功")))
}
