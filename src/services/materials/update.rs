use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, material_detail};
use crate::models::materials::requests::UpdateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    update_data: UpdateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(material) = storage.get_material_by_id(material_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在")));
    };

    if !access::can_mutate_owned(&actor, material.teacher_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "只能修改自己上传的资料")));
    }

    if matches!(update_data.title.as_deref(), Some(t) if t.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "资料标题不能为空")));
    }

    let update = UpdateMaterialRequest {
        title: update_data.title.map(|t| t.trim().to_string()),
        ..update_data
    };

    match storage.update_material(material_id, update).await? {
        Some(material) => Ok(HttpResponse::Ok().json(material_detail(storage.as_ref(), material).await?)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在"))),
    }
}
