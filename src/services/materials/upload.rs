use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::files::{UploadForm, discard, receive_upload, remove_stored_file};
use super::{MaterialService, material_detail};
use crate::models::materials::{entities::MaterialType, requests::NewMaterial};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{access, current_user};
use crate::utils::material_type_for_extension;

fn bad_request(form: &UploadForm, code: ErrorCode, message: &str) -> HttpResponse {
    discard(form);
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub async fn upload_material(
    service: &MaterialService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    if !access::can_author(&actor) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "没有权限上传资料")));
    }

    let form = match receive_upload(payload).await {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let Some(file) = form.file.clone() else {
        return Ok(bad_request(&form, ErrorCode::FileNotFound, "未找到上传的文件"));
    };

    let Some(title) = form.field("title").map(str::to_string) else {
        return Ok(bad_request(&form, ErrorCode::BadRequest, "资料标题不能为空"));
    };

    let Some(course_id) = form.field("course_id").and_then(|v| v.parse::<i64>().ok()) else {
        return Ok(bad_request(&form, ErrorCode::BadRequest, "课程 ID 无效"));
    };

    let material_type = match form.field("type") {
        Some(value) => match value.parse::<MaterialType>() {
            Ok(material_type) => material_type,
            Err(_) => return Ok(bad_request(&form, ErrorCode::BadRequest, "资料类型无效")),
        },
        None => form
            .extension
            .as_deref()
            .map(material_type_for_extension)
            .unwrap_or_default(),
    };

    if storage.get_course_by_id(course_id).await?.is_none() {
        discard(&form);
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在")));
    }

    let new_material = NewMaterial {
        title,
        description: form.field("description").map(str::to_string),
        course_id,
        teacher_id: actor.id,
        material_type,
        file: Some(file),
        file_url: None,
    };

    let material = match storage.create_material(new_material).await {
        Ok(material) => material,
        Err(e) => {
            discard(&form);
            return Err(e.into());
        }
    };

    info!(
        "Material {} uploaded by {} ({} bytes)",
        material.id,
        actor.id,
        material.file_size.unwrap_or_default()
    );
    Ok(HttpResponse::Created().json(material_detail(storage.as_ref(), material).await?))
}

pub async fn replace_material_file(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    payload: Multipart,
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

    let form = match receive_upload(payload).await {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let Some(file) = form.file.clone() else {
        return Ok(bad_request(&form, ErrorCode::FileNotFound, "未找到上传的文件"));
    };

    let updated = match storage.replace_material_file(material_id, file).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            discard(&form);
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在")));
        }
        Err(e) => {
            discard(&form);
            return Err(e.into());
        }
    };

    // 旧文件删除失败只记录日志
    if let Some(old) = &material.stored_name {
        remove_stored_file(old);
    }

    info!("Material {} file replaced by {}", material_id, actor.id);
    Ok(HttpResponse::Ok().json(material_detail(storage.as_ref(), updated).await?))
}
