use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_details};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(grade) = storage.get_grade_by_id(grade_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "成绩不存在")));
    };

    if !access::can_view_grade(&actor, &grade) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限查看该成绩")));
    }

    match grade_details(storage.as_ref(), vec![grade]).await?.pop() {
        Some(detail) => Ok(HttpResponse::Ok().json(detail)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "成绩不存在"))),
    }
}
