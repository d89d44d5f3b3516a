use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, material_details};
use crate::models::materials::requests::MaterialListQuery;

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    query: MaterialListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let materials = storage.list_materials(query.course_id).await?;
    let details = material_details(storage.as_ref(), materials).await?;

    Ok(HttpResponse::Ok().json(details))
}
