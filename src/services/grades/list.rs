use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_details};
use crate::models::grades::requests::GradeListQuery;
use crate::services::{access, current_user};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    // 学生只能看到自己的成绩
    let query = GradeListQuery {
        student_id: access::grade_scope(&actor, query.student_id),
        course_id: query.course_id,
    };

    let grades = storage.list_grades(query).await?;
    let details = grade_details(storage.as_ref(), grades).await?;

    Ok(HttpResponse::Ok().json(details))
}
