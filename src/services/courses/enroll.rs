use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::{PortalError, Result};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user, error_with_code};
use crate::storage::Storage;

/// 学生选课
pub async fn enroll_student(storage: &dyn Storage, actor: &User, course_id: i64) -> Result<()> {
    if !access::can_enroll(actor) {
        return Err(PortalError::authorization("只有学生可以选课"));
    }

    if storage.get_course_by_id(course_id).await?.is_none() {
        return Err(PortalError::not_found("课程不存在"));
    }

    storage.enroll_student(course_id, actor.id).await
}

pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    match enroll_student(storage.as_ref(), &actor, course_id).await {
        Ok(()) => {
            info!("Student {} enrolled in course {}", actor.id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::message("选课成功")))
        }
        Err(e @ PortalError::NotFound(_)) => Ok(error_with_code(e, ErrorCode::CourseNotFound)),
        Err(e @ PortalError::Conflict(_)) => {
            Ok(error_with_code(e, ErrorCode::CourseAlreadyEnrolled))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::access::tests::actor;
    use crate::storage::sea_orm_storage::fixtures;

    #[tokio::test]
    async fn test_enroll_rules() {
        let storage = fixtures::storage().await;
        let student = fixtures::user(&storage, "s@example.com", UserRole::Student).await;
        let course = fixtures::course(&storage, "CS101").await;

        assert!(matches!(
            enroll_student(&storage, &student, 999).await,
            Err(PortalError::NotFound(_))
        ));
        assert!(matches!(
            enroll_student(&storage, &actor(50, UserRole::Teacher), course.id).await,
            Err(PortalError::Authorization(_))
        ));

        enroll_student(&storage, &student, course.id).await.unwrap();
        assert!(matches!(
            enroll_student(&storage, &student, course.id).await,
            Err(PortalError::Conflict(_))
        ));
    }
}
