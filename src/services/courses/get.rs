use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::entities::CourseWithStudents;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(course) = storage.get_course_by_id(course_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    };

    let students = storage.list_course_students(course_id).await?;
    Ok(HttpResponse::Ok().json(CourseWithStudents { course, students }))
}
