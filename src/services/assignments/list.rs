use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use super::details::{assignment_details, group_by_assignment, submission_details};
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::users::entities::UserRole;
use crate::services::current_user;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let assignments = storage.list_assignments(query.course_id).await?;
    let details = assignment_details(storage.as_ref(), assignments, None).await?;

    Ok(HttpResponse::Ok().json(details))
}

pub async fn list_my_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let (assignments, student_filter, with_student) = match actor.role {
        UserRole::Student => {
            let course_ids: Vec<i64> = storage
                .list_student_courses(actor.id)
                .await?
                .iter()
                .map(|c| c.id)
                .collect();
            let assignments = storage.list_assignments_by_courses(&course_ids).await?;
            (assignments, Some(actor.id), false)
        }
        UserRole::Teacher | UserRole::Admin => {
            let assignments = storage.list_assignments_by_teacher(actor.id).await?;
            (assignments, None, true)
        }
    };

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = storage
        .list_submissions_by_assignments(&assignment_ids, student_filter)
        .await?;
    let submissions = submission_details(storage.as_ref(), submissions, with_student).await?;

    let details = assignment_details(
        storage.as_ref(),
        assignments,
        Some(group_by_assignment(submissions)),
    )
    .await?;

    Ok(HttpResponse::Ok().json(details))
}
