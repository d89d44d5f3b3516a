use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MaterialService, material_detail};
use crate::models::materials::requests::{CreateMaterialRequest, NewMaterial};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_data: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if !access::can_author(&actor) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限上传资料")));
    }

    let title = material_data.title.trim().to_string();
    if title.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "资料标题不能为空")));
    }

    if storage
        .get_course_by_id(material_data.course_id)
        .await?
        .is_none()
    {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    }

    let material = storage
        .create_material(NewMaterial {
            title,
            description: material_data.description,
            course_id: material_data.course_id,
            teacher_id: actor.id,
            material_type: material_data.material_type.unwrap_or_default(),
            file: None,
            file_url: material_data.file_url.filter(|url| !url.trim().is_empty()),
        })
        .await?;

    info!("Material {} created by {}", material.id, actor.id);
    Ok(HttpResponse::Created().json(material_detail(storage.as_ref(), material).await?))
}
