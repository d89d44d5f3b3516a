use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_details};
use crate::models::schedules::requests::UpdateScheduleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};
use crate::utils::validate::validate_schedule_slot;

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    mut update_data: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(existing) = storage.get_schedule_by_id(schedule_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在")));
    };

    if !access::can_mutate_owned(&actor, existing.teacher_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "只能修改自己的课表")));
    }

    // 与现有值合并后整体校验时段
    let (start, end) = match validate_schedule_slot(
        update_data.day_of_week.unwrap_or(existing.day_of_week),
        update_data.start_time.as_deref().unwrap_or(&existing.start_time),
        update_data.end_time.as_deref().unwrap_or(&existing.end_time),
    ) {
        Ok(slot) => slot,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };
    update_data.start_time = update_data.start_time.map(|_| start);
    update_data.end_time = update_data.end_time.map(|_| end);

    if let Some(course_id) = update_data.course_id
        && storage.get_course_by_id(course_id).await?.is_none()
    {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    }

    let Some(updated) = storage.update_schedule(schedule_id, update_data).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在")));
    };

    match schedule_details(storage.as_ref(), vec![updated]).await?.pop() {
        Some(detail) => Ok(HttpResponse::Ok().json(detail)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在"))),
    }
}
