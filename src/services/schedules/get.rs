use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_details};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(schedule) = storage.get_schedule_by_id(schedule_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在")));
    };

    match schedule_details(storage.as_ref(), vec![schedule]).await?.pop() {
        Some(detail) => Ok(HttpResponse::Ok().json(detail)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleNotFound, "课表条目不存在"))),
    }
}
