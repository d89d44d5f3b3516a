use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, schedule_details};
use crate::errors::{PortalError, Result};
use crate::models::schedules::requests::CreateScheduleRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};
use crate::utils::validate::validate_schedule_slot;

/// 确定课表的授课教师：教师为本人，管理员必须在请求中指定
pub fn resolve_teacher(actor: &User, requested: Option<i64>) -> Result<i64> {
    match actor.role {
        UserRole::Teacher => Ok(actor.id),
        UserRole::Admin => requested.ok_or_else(|| PortalError::validation("管理员创建课表时需指定 teacher_id")),
        UserRole::Student => Err(PortalError::authorization("没有权限创建课表")),
    }
}

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    mut schedule_data: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if !access::can_author(&actor) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限创建课表")));
    }

    let teacher_id = resolve_teacher(&actor, schedule_data.teacher_id)?;

    let (start, end) = match validate_schedule_slot(
        schedule_data.day_of_week,
        &schedule_data.start_time,
        &schedule_data.end_time,
    ) {
        Ok(slot) => slot,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };
    schedule_data.start_time = start;
    schedule_data.end_time = end;

    if storage
        .get_course_by_id(schedule_data.course_id)
        .await?
        .is_none()
    {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    }

    if teacher_id != actor.id {
        match storage.get_user_by_id(teacher_id).await? {
            Some(teacher) if teacher.role == UserRole::Teacher => {}
            Some(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "teacher_id 必须是教师账号",
                )));
            }
            None => {
                return Ok(HttpResponse::NotFound()
                    .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "教师不存在")));
            }
        }
    }

    let schedule = storage.create_schedule(teacher_id, schedule_data).await?;
    info!("Schedule {} created by {}", schedule.id, actor.id);

    match schedule_details(storage.as_ref(), vec![schedule]).await?.pop() {
        Some(detail) => Ok(HttpResponse::Created().json(detail)),
        None => Err(PortalError::database_operation("创建课表后未找到记录").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::access::tests::actor;

    #[test]
    fn test_resolve_teacher() {
        assert_eq!(resolve_teacher(&actor(2, UserRole::Teacher), Some(9)).unwrap(), 2);
        assert_eq!(resolve_teacher(&actor(3, UserRole::Admin), Some(9)).unwrap(), 9);
        assert!(matches!(
            resolve_teacher(&actor(3, UserRole::Admin), None),
            Err(PortalError::Validation(_))
        ));
        assert!(matches!(
            resolve_teacher(&actor(1, UserRole::Student), Some(9)),
            Err(PortalError::Authorization(_))
        ));
    }
}
