use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if !access::can_author(&actor) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限布置作业")));
    }

    assignment_data.title = assignment_data.title.trim().to_string();
    if assignment_data.title.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "作业标题不能为空")));
    }
    if matches!(assignment_data.max_score, Some(max) if max <= 0) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "满分必须大于 0")));
    }

    if storage
        .get_course_by_id(assignment_data.course_id)
        .await?
        .is_none()
    {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    }

    // 布置者即当前用户
    let assignment = storage.create_assignment(actor.id, assignment_data).await?;
    info!(
        "Assignment {} created in course {} by {}",
        assignment.id, assignment.course_id, actor.id
    );

    Ok(HttpResponse::Created().json(assignment))
}
