//! 作业提交
//!
//! 同一学生对同一作业只能提交一次：存储层先查重，唯一索引兜住并发重复提交。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::{PortalError, Result};
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::User;
use crate::models::ErrorCode;
use crate::services::{access, current_user, error_with_code};
use crate::storage::Storage;

/// 学生提交作业，新提交的状态为 submitted
pub async fn submit_assignment(
    storage: &dyn Storage,
    actor: &User,
    assignment_id: i64,
    req: SubmitAssignmentRequest,
) -> Result<Submission> {
    if !access::can_submit(actor) {
        return Err(PortalError::authorization("只有学生可以提交作业"));
    }

    if storage.get_assignment_by_id(assignment_id).await?.is_none() {
        return Err(PortalError::not_found("作业不存在"));
    }

    storage
        .create_submission(assignment_id, actor.id, req.content, req.attachments)
        .await
}

pub async fn handle_submit(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submit_data: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    match submit_assignment(storage.as_ref(), &actor, assignment_id, submit_data).await {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {} (submission {})",
                actor.id, assignment_id, submission.id
            );
            Ok(HttpResponse::Created().json(submission))
        }
        Err(e @ PortalError::NotFound(_)) => Ok(error_with_code(e, ErrorCode::AssignmentNotFound)),
        Err(e @ PortalError::Conflict(_)) => {
            Ok(error_with_code(e, ErrorCode::SubmissionAlreadyExists))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::fixtures;

    fn answer(content: &str) -> SubmitAssignmentRequest {
        SubmitAssignmentRequest {
            content: Some(content.to_string()),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_submit_creates_submitted_record() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let student = fixtures::user(&storage, "s@example.com", UserRole::Student).await;
        let course = fixtures::course(&storage, "CS101").await;
        let assignment = fixtures::assignment(&storage, course.id, teacher.id, 100).await;

        let submission = submit_assignment(&storage, &student, assignment.id, answer("done"))
            .await
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert_eq!(submission.student_id, student.id);
        assert_eq!(submission.content.as_deref(), Some("done"));
        assert!(submission.attachments.is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_conflicts() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let student = fixtures::user(&storage, "s@example.com", UserRole::Student).await;
        let course = fixtures::course(&storage, "CS101").await;
        let assignment = fixtures::assignment(&storage, course.id, teacher.id, 100).await;

        submit_assignment(&storage, &student, assignment.id, answer("v1"))
            .await
            .unwrap();
        let second = submit_assignment(&storage, &student, assignment.id, answer("v2")).await;

        assert!(matches!(second, Err(PortalError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_assignment_and_non_students() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let student = fixtures::user(&storage, "s@example.com", UserRole::Student).await;
        let course = fixtures::course(&storage, "CS101").await;
        let assignment = fixtures::assignment(&storage, course.id, teacher.id, 100).await;

        assert!(matches!(
            submit_assignment(&storage, &student, 999, answer("x")).await,
            Err(PortalError::NotFound(_))
        ));
        assert!(matches!(
            submit_assignment(&storage, &teacher, assignment.id, answer("x")).await,
            Err(PortalError::Authorization(_))
        ));
    }
}
