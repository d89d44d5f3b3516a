use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use super::files::remove_stored_file;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let Some(material) = storage.get_material_by_id(material_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在")));
    };

    if !access::can_mutate_owned(&actor, material.teacher_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "只能删除自己上传的资料")));
    }

    // 文件删除失败不影响记录删除
    if let Some(stored_name) = &material.stored_name {
        remove_stored_file(stored_name);
    }

    if !storage.delete_material(material_id).await? {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在")));
    }

    info!("Material {} deleted by {}", material_id, actor.id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("资料已删除")))
}
