//! 作业评分
//!
//! 成绩以提交 ID 为键 upsert，同一事务内把提交状态推进到 graded。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::{PortalError, Result};
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::grades::{requests::UpsertGradeRequest, responses::GradeDetail};
use crate::models::users::entities::User;
use crate::models::ErrorCode;
use crate::services::grades::grade_details;
use crate::services::{access, current_user, error_with_code};
use crate::storage::Storage;

/// 校验分数并确定有效满分：显式给出的满分，否则沿用已有成绩，否则取作业满分
fn effective_max_score(
    req: &GradeSubmissionRequest,
    existing_max: Option<i32>,
    assignment_max: i32,
) -> Result<i32> {
    if !req.score.is_finite() || req.score < 0.0 {
        return Err(PortalError::validation("分数不能为负数"));
    }
    if matches!(req.max_score, Some(max) if max <= 0) {
        return Err(PortalError::validation("满分必须大于 0"));
    }

    let max_score = req.max_score.or(existing_max).unwrap_or(assignment_max);
    if req.score > f64::from(max_score) {
        return Err(PortalError::validation(format!(
            "分数不能超过满分 {max_score}"
        )));
    }

    Ok(max_score)
}

/// 教师为提交评分，重复评分覆盖原成绩
pub async fn grade_submission(
    storage: &dyn Storage,
    actor: &User,
    submission_id: i64,
    req: GradeSubmissionRequest,
) -> Result<GradeDetail> {
    if !access::can_author(actor) {
        return Err(PortalError::authorization("只有教师可以评分"));
    }

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| PortalError::not_found("提交不存在"))?;

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| PortalError::not_found("提交对应的作业不存在"))?;

    // 提前给出校验错误，存储层在事务内按加锁后的成绩行再次校验
    let existing_max = storage
        .get_grade_by_submission_id(submission.id)
        .await?
        .map(|g| g.max_score);
    effective_max_score(&req, existing_max, assignment.max_score)?;

    let grade = storage
        .upsert_grade(UpsertGradeRequest {
            submission_id: submission.id,
            student_id: submission.student_id,
            course_id: assignment.course_id,
            score: req.score,
            max_score: req.max_score.unwrap_or(assignment.max_score),
            override_max_score: req.max_score.is_some(),
            feedback: req.feedback,
        })
        .await?;

    grade_details(storage, vec![grade])
        .await?
        .pop()
        .ok_or_else(|| PortalError::database_operation("保存成绩后未找到记录"))
}

pub async fn handle_grade(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    match grade_submission(storage.as_ref(), &actor, submission_id, grade_data).await {
        Ok(detail) => {
            info!(
                "Submission {} graded {}/{} by {}",
                submission_id, detail.grade.score, detail.grade.max_score, actor.id
            );
            Ok(HttpResponse::Ok().json(detail))
        }
        Err(e @ PortalError::NotFound(_)) => Ok(error_with_code(e, ErrorCode::SubmissionNotFound)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::SubmitAssignmentRequest;
    use crate::models::grades::requests::GradeListQuery;
    use crate::models::submissions::entities::{Submission, SubmissionStatus};
    use crate::models::users::entities::UserRole;
    use crate::services::assignments::submit_assignment;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    async fn setup(max_score: i32) -> (SeaOrmStorage, User, Submission) {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let student = fixtures::user(&storage, "s@example.com", UserRole::Student).await;
        let course = fixtures::course(&storage, "CS101").await;
        let assignment = fixtures::assignment(&storage, course.id, teacher.id, max_score).await;
        let submission = submit_assignment(
            &storage,
            &student,
            assignment.id,
            SubmitAssignmentRequest::default(),
        )
        .await
        .unwrap();
        (storage, teacher, submission)
    }

    fn score(score: f64) -> GradeSubmissionRequest {
        GradeSubmissionRequest {
            score,
            max_score: None,
            feedback: None,
        }
    }

    #[test]
    fn test_effective_max_score_resolution() {
        assert_eq!(effective_max_score(&score(10.0), None, 100).unwrap(), 100);
        assert_eq!(effective_max_score(&score(10.0), Some(20), 100).unwrap(), 20);

        let explicit = GradeSubmissionRequest {
            max_score: Some(50),
            ..score(10.0)
        };
        assert_eq!(effective_max_score(&explicit, Some(20), 100).unwrap(), 50);
    }

    #[test]
    fn test_effective_max_score_rejects_invalid() {
        assert!(effective_max_score(&score(-1.0), None, 100).is_err());
        assert!(effective_max_score(&score(101.0), None, 100).is_err());
        assert!(effective_max_score(&score(30.0), Some(20), 100).is_err());

        let zero_max = GradeSubmissionRequest {
            max_score: Some(0),
            ..score(0.0)
        };
        assert!(effective_max_score(&zero_max, None, 100).is_err());
    }

    #[tokio::test]
    async fn test_grade_marks_submission_graded() {
        let (storage, teacher, submission) = setup(100).await;

        let detail = grade_submission(&storage, &teacher, submission.id, score(88.0))
            .await
            .unwrap();

        assert_eq!(detail.grade.score, 88.0);
        assert_eq!(detail.grade.max_score, 100);
        assert_eq!(detail.student.as_ref().map(|s| s.id), Some(submission.student_id));
        assert_eq!(
            detail.submission.as_ref().map(|s| s.status),
            Some(SubmissionStatus::Graded)
        );
    }

    #[tokio::test]
    async fn test_regrade_updates_single_row() {
        let (storage, teacher, submission) = setup(100).await;

        let first = grade_submission(&storage, &teacher, submission.id, score(60.0))
            .await
            .unwrap();
        let second = grade_submission(&storage, &teacher, submission.id, score(95.0))
            .await
            .unwrap();

        assert_eq!(first.grade.id, second.grade.id);
        assert_eq!(second.grade.score, 95.0);

        let grades = storage
            .list_grades(GradeListQuery {
                student_id: Some(submission.student_id),
                course_id: None,
            })
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
    }

    #[tokio::test]
    async fn test_regrade_without_feedback_clears_it() {
        let (storage, teacher, submission) = setup(100).await;

        let first = grade_submission(
            &storage,
            &teacher,
            submission.id,
            GradeSubmissionRequest {
                feedback: Some("bad".into()),
                ..score(50.0)
            },
        )
        .await
        .unwrap();
        assert_eq!(first.grade.feedback.as_deref(), Some("bad"));

        let second = grade_submission(&storage, &teacher, submission.id, score(95.0))
            .await
            .unwrap();
        assert_eq!(second.grade.score, 95.0);
        assert_eq!(second.grade.feedback, None);
    }

    #[tokio::test]
    async fn test_grade_validation_and_missing_submission() {
        let (storage, teacher, submission) = setup(20).await;

        assert!(matches!(
            grade_submission(&storage, &teacher, submission.id, score(25.0)).await,
            Err(PortalError::Validation(_))
        ));
        assert!(matches!(
            grade_submission(&storage, &teacher, 999, score(5.0)).await,
            Err(PortalError::NotFound(_))
        ));

        let student = storage
            .get_user_by_id(submission.student_id)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            grade_submission(&storage, &student, submission.id, score(5.0)).await,
            Err(PortalError::Authorization(_))
        ));
    }
}
