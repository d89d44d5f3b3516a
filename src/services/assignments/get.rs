use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use super::details::{assignment_details, group_by_assignment, submission_details};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(assignment) = storage.get_assignment_by_id(assignment_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentNotFound, "作业不存在")));
    };

    // 学生只能看到自己的提交
    let student_filter = (actor.role == UserRole::Student).then_some(actor.id);
    let submissions = storage
        .list_submissions_by_assignments(&[assignment.id], student_filter)
        .await?;
    let submissions = submission_details(storage.as_ref(), submissions, true).await?;

    match assignment_details(
        storage.as_ref(),
        vec![assignment],
        Some(group_by_assignment(submissions)),
    )
    .await?
    .pop()
    {
        Some(detail) => Ok(HttpResponse::Ok().json(detail)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AssignmentNotFound, "作业不存在"))),
    }
}
