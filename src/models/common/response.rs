use serde::{Deserialize, Serialize};

use crate::models::ErrorCode;

// 统一的消息/错误响应结构
// 成功时直接返回资源 JSON，只有无资源可返回的操作与错误使用该结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
            code: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(message.into()),
            code: Some(code as i32),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ApiResponse::error_empty(ErrorCode::NotFound, "不存在"))
            .unwrap();
        assert_eq!(body["error"], "不存在");
        assert_eq!(body["code"], ErrorCode::NotFound as i32);
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_message_body_shape() {
        let body = serde_json::to_value(ApiResponse::message("ok")).unwrap();
        assert_eq!(body["message"], "ok");
        assert!(body.get("error").is_none());
        assert!(body.get("code").is_none());
    }
}
