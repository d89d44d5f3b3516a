use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::PortalError;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user, error_with_code};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if !access::can_author(&actor) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限创建课程")));
    }

    course_data.name = course_data.name.trim().to_string();
    course_data.code = course_data.code.trim().to_string();
    if course_data.name.is_empty() || course_data.code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课程名称和课程代码均为必填项",
        )));
    }
    if matches!(course_data.credits, Some(c) if c < 0) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "学分不能为负数")));
    }

    if storage.get_course_by_code(&course_data.code).await?.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseCodeAlreadyExists,
            "课程代码已存在",
        )));
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} ({}) created by {}", course.id, course.code, actor.id);
            Ok(HttpResponse::Created().json(course))
        }
        Err(e @ PortalError::Conflict(_)) => {
            Ok(error_with_code(e, ErrorCode::CourseCodeAlreadyExists))
        }
        Err(e) => Err(e.into()),
    }
}
