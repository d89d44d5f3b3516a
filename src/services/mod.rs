pub mod access;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod grades;
pub mod materials;
pub mod schedules;
pub mod system;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use materials::MaterialService;
pub use schedules::ScheduleService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{PortalError, Result};
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseBrief;
use crate::models::users::entities::{User, UserBrief};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从应用数据中获取存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| PortalError::database_config("Storage not found in app data"))
}

/// 当前登录用户，由 RequireJWT 放入请求扩展
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| PortalError::authentication("需要登录"))
}

/// 以业务错误码返回错误，状态码仍由错误类型决定
pub(crate) fn error_with_code(err: PortalError, code: ErrorCode) -> HttpResponse {
    HttpResponse::build(err.http_status()).json(ApiResponse::error_empty(code, err.public_message()))
}

/// 批量加载用户摘要，按 ID 索引
pub(crate) async fn user_brief_map(
    storage: &dyn Storage,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, UserBrief>> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    Ok(storage
        .list_user_briefs(&ids)
        .await?
        .into_iter()
        .map(|brief| (brief.id, brief))
        .collect())
}

/// 批量加载课程摘要，按 ID 索引
pub(crate) async fn course_brief_map(
    storage: &dyn Storage,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, CourseBrief>> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    Ok(storage
        .list_course_briefs(&ids)
        .await?
        .into_iter()
        .map(|brief| (brief.id, brief))
        .collect())
}
