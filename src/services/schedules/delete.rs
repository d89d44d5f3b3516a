use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(existing) = storage.get_schedule_by_id(schedule_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在")));
    };

    if !access::can_mutate_owned(&actor, existing.teacher_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "只能删除自己的课表")));
    }

    if !storage.delete_schedule(schedule_id).await? {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在")));
    }

    info!("Schedule {} deleted by {}", schedule_id, actor.id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("课表条目已删除")))
}
