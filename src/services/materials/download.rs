use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::io::ErrorKind;

use super::MaterialService;
use super::files::{is_safe_stored_name, stored_file_path};
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};

fn file_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::FileNotFound, "文件不存在"))
}

/// 读取上传目录中的文件，以附件形式返回
async fn send_stored_file(stored_name: &str, download_name: &str) -> ActixResult<HttpResponse> {
    if !is_safe_stored_name(stored_name) {
        return Ok(file_not_found());
    }

    let path = stored_file_path(stored_name);
    let buf = match std::fs::read(&path) {
        Ok(buf) => buf,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(file_not_found()),
        Err(e) => {
            return Err(PortalError::file_operation(format!(
                "读取文件 {} 失败: {e}",
                path.display()
            ))
            .into());
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                download_name.replace(['"', '\\', '\r', '\n'], "_")
            ),
        ))
        .body(buf))
}

pub async fn download_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(material) = storage.get_material_by_id(material_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::MaterialNotFound, "资料不存在")));
    };

    // 外部链接形式的资料没有可下载的文件
    let Some(stored_name) = material.stored_name.as_deref() else {
        return Ok(file_not_found());
    };

    let download_name = material.file_name.as_deref().unwrap_or(stored_name);
    send_stored_file(stored_name, download_name).await
}

/// `/uploads/{filename}` 静态访问
pub async fn serve_upload(filename: &str) -> ActixResult<HttpResponse> {
    send_stored_file(filename, filename).await
}
