//! JSON 请求体与查询参数解析错误处理，统一返回 400

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload rejected on {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "请求体必须为 application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "请求体过大".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("请求体格式错误: {e}"),
        _ => format!("请求体解析失败: {err}"),
    };

    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query string rejected on {}: {}", req.path(), err);

    let message = format!("查询参数错误: {err}");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}
