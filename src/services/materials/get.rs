use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, material_detail};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_material_by_id(material_id).await? {
        Some(material) => Ok(HttpResponse::Ok().json(material_detail(storage.as_ref(), material).await?)),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在"))),
    }
}
