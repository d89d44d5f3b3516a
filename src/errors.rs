//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(PortalError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", BAD_REQUEST),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    Conflict("E010", "Conflict Error", CONFLICT),
    DateParse("E011", "Date Parse Error", BAD_REQUEST),
    Authentication("E012", "Authentication Error", UNAUTHORIZED),
    Authorization("E013", "Authorization Error", FORBIDDEN),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 API 错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            PortalError::Validation(_) | PortalError::DateParse(_) => ErrorCode::BadRequest,
            PortalError::Authentication(_) => ErrorCode::Unauthorized,
            PortalError::Authorization(_) => ErrorCode::Forbidden,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Conflict(_) => ErrorCode::Conflict,
            PortalError::FileOperation(_) => ErrorCode::FileUploadFailed,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 返回给客户端的消息，生产环境隐藏内部错误细节
    pub fn public_message(&self) -> String {
        if self.http_status().is_server_error() && crate::config::AppConfig::get().is_production()
        {
            "服务器内部错误".to_string()
        } else {
            self.message().to_string()
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.http_status().is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.http_status())
            .json(ApiResponse::error_empty(self.error_code(), self.public_message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::cache_connection("test").code(), "E001");
        assert_eq!(PortalError::database_config("test").code(), "E003");
        assert_eq!(PortalError::validation("test").code(), "E007");
        assert_eq!(PortalError::conflict("test").code(), "E010");
        assert_eq!(PortalError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            PortalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            PortalError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PortalError::authentication("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PortalError::authorization("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PortalError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PortalError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PortalError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortalError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::not_found("作业不存在");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("作业不存在"));
    }

    #[test]
    fn test_db_err_conversion() {
        let err: PortalError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert_eq!(err.error_code(), ErrorCode::InternalServerError);
    }
}
