/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的访问令牌，并把当前用户放入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireJWT;
 *
 * web::scope("/api/courses")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_courses));
 *
 * async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::extract_user_claims(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 提取并校验令牌签名、类型与有效期
 * 2. 以 `user:{token}` 为键查询对象缓存
 * 3. 缓存未命中时按令牌中的用户 ID 查询存储，并写回缓存
 * 4. 任一步失败返回 401
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities;
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败原因
enum Rejection {
    Unauthorized(&'static str),
    Misconfigured(&'static str),
}

/// 已认证用户在缓存中的键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// 从请求头中提取 Bearer 令牌
pub fn bearer_token(req: &actix_web::HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// 提取并验证 JWT access token
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, Rejection> {
    let token = bearer_token(req.request())
        .ok_or(Rejection::Unauthorized("缺少认证令牌"))?
        .to_string();

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        Rejection::Unauthorized("认证令牌无效或已过期")
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .ok_or(Rejection::Misconfigured("Cache not found in app data"))?
        .get_ref()
        .clone();

    let cache_key = user_cache_key(&token);
    if let CacheResult::Found(user) = cache.get_json::<entities::User>(&cache_key).await {
        return Ok(user);
    }

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or(Rejection::Misconfigured("Storage not found in app data"))?
        .get_ref()
        .clone();

    let user_id = claims
        .user_id()
        .ok_or(Rejection::Unauthorized("认证令牌无效"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {} for authentication: {}", user_id, e);
            Rejection::Unauthorized("无法验证用户")
        })?
        .ok_or(Rejection::Unauthorized("用户不存在"))?;

    cache
        .insert_json(cache_key, &user, AppConfig::get().cache.default_ttl)
        .await;

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(Rejection::Unauthorized(reason)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        reason
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            reason,
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(Rejection::Misconfigured(reason)) => {
                    error!("JWT middleware misconfigured: {}", reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "服务器内部错误",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }
}
