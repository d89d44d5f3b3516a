use serde::Serialize;

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub modules: Vec<String>,
    pub uptime_seconds: i64,
}
