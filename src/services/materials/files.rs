//! 资料文件的接收、落盘与删除

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::materials::requests::StoredFile;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{file_extension, validate_magic_bytes};

const FILE_FIELD: &str = "file";
const MAX_TEXT_FIELD_LEN: usize = 64 * 1024;

/// 上传被拒绝的原因
#[derive(Debug)]
pub(crate) enum UploadRejection {
    Invalid(ErrorCode, &'static str),
    Failed(PortalError),
}

impl UploadRejection {
    pub(crate) fn into_response(self) -> actix_web::HttpResponse {
        match self {
            UploadRejection::Invalid(code, message) => actix_web::HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(code, message)),
            UploadRejection::Failed(err) => {
                tracing::error!("{}", err.format_simple());
                actix_web::HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    err.public_message(),
                ))
            }
        }
    }
}

impl From<std::io::Error> for UploadRejection {
    fn from(err: std::io::Error) -> Self {
        UploadRejection::Failed(PortalError::file_operation(format!("{err}")))
    }
}

/// 解析后的 multipart 表单
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file: Option<StoredFile>,
    /// 上传文件的扩展名（带点号、小写）
    pub extension: Option<String>,
}

impl UploadForm {
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// 上传目录中存储文件的路径
pub(crate) fn stored_file_path(stored_name: &str) -> PathBuf {
    Path::new(&AppConfig::get().upload.dir).join(stored_name)
}

/// 存储文件名只能是单个路径段
pub(crate) fn is_safe_stored_name(stored_name: &str) -> bool {
    !stored_name.is_empty()
        && !stored_name.starts_with('.')
        && !stored_name.contains(['/', '\\'])
}

/// 删除存储文件，失败只记录日志
pub(crate) fn remove_stored_file(stored_name: &str) {
    let path = stored_file_path(stored_name);
    if let Err(e) = fs::remove_file(&path) {
        tracing::warn!("Failed to remove stored file {}: {}", path.display(), e);
    }
}

/// 接收 multipart 表单：文本字段收集到 `fields`，`file` 字段校验后落盘
///
/// 只允许一个文件；扩展名必须在允许列表中，且文件头需与扩展名匹配。
pub(crate) async fn receive_upload(mut payload: Multipart) -> Result<UploadForm, UploadRejection> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    if !Path::new(upload_dir).exists() {
        fs::create_dir_all(upload_dir)?;
    }

    let mut form = UploadForm::default();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::info!("Malformed multipart payload: {}", e);
                discard(&form);
                return Err(UploadRejection::Invalid(ErrorCode::BadRequest, "上传数据格式错误"));
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name != FILE_FIELD {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let Ok(data) = chunk else {
                    discard(&form);
                    return Err(UploadRejection::Invalid(ErrorCode::BadRequest, "上传数据格式错误"));
                };
                if value.len() + data.len() > MAX_TEXT_FIELD_LEN {
                    discard(&form);
                    return Err(UploadRejection::Invalid(ErrorCode::BadRequest, "表单字段过长"));
                }
                value.extend_from_slice(&data);
            }
            form.fields
                .insert(name, String::from_utf8_lossy(&value).into_owned());
            continue;
        }

        if form.file.is_some() {
            discard(&form);
            return Err(UploadRejection::Invalid(
                ErrorCode::MultifileUploadNotAllowed,
                "一次只能上传一个文件",
            ));
        }

        let original_name = original_name.unwrap_or_default();
        let extension = match file_extension(&original_name) {
            Some(ext) if config.upload.allowed_extensions.iter().any(|t| t.to_lowercase() == ext) => ext,
            _ => {
                discard(&form);
                return Err(UploadRejection::Invalid(
                    ErrorCode::FileTypeNotAllowed,
                    "不支持的文件类型",
                ));
            }
        };

        let stored_name = format!("{}{}", Uuid::new_v4(), extension);
        let file_path = stored_file_path(&stored_name);
        let mut f = File::create(&file_path)?;

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    tracing::info!("Upload interrupted: {}", e);
                    let _ = fs::remove_file(&file_path);
                    discard(&form);
                    return Err(UploadRejection::Invalid(ErrorCode::BadRequest, "上传数据格式错误"));
                }
            };

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    discard(&form);
                    return Err(UploadRejection::Invalid(
                        ErrorCode::FileTypeNotAllowed,
                        "文件内容与扩展名不匹配",
                    ));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                discard(&form);
                return Err(UploadRejection::Invalid(
                    ErrorCode::FileSizeExceeded,
                    "文件大小超过限制",
                ));
            }
            f.write_all(&data)?;
        }

        if total_size == 0 {
            let _ = fs::remove_file(&file_path);
            discard(&form);
            return Err(UploadRejection::Invalid(ErrorCode::BadRequest, "上传的文件为空"));
        }

        form.file = Some(StoredFile {
            stored_name,
            original_name,
            size: total_size as i64,
        });
        form.extension = Some(extension);
    }

    Ok(form)
}

/// 表单被拒绝时清理已落盘的文件
pub(crate) fn discard(form: &UploadForm) {
    if let Some(file) = &form.file {
        remove_stored_file(&file.stored_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_stored_name() {
        assert!(is_safe_stored_name("0b9c.pdf"));
        assert!(!is_safe_stored_name(""));
        assert!(!is_safe_stored_name("../etc/passwd"));
        assert!(!is_safe_stored_name("a/b.pdf"));
        assert!(!is_safe_stored_name(".hidden"));
    }

    #[test]
    fn test_form_field_trims_and_skips_blank() {
        let mut form = UploadForm::default();
        form.fields.insert("title".into(), "  Lecture  ".into());
        form.fields.insert("description".into(), "   ".into());

        assert_eq!(form.field("title"), Some("Lecture"));
        assert_eq!(form.field("description"), None);
        assert_eq!(form.field("missing"), None);
    }
}
