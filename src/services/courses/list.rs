use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::services::current_user;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let courses = storage.list_courses_with_students().await?;
    Ok(HttpResponse::Ok().json(courses))
}

pub async fn list_my_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let courses = storage.list_student_courses(actor.id).await?;
    Ok(HttpResponse::Ok().json(courses))
}
