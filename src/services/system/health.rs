use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::AppStartTime;
use crate::models::system::responses::HealthResponse;

/// 已启用的业务模块
pub const MODULES: &[&str] = &[
    "auth",
    "profile",
    "courses",
    "assignments",
    "grades",
    "materials",
    "schedule",
];

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<actix_web::web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        modules: MODULES.iter().map(|m| m.to_string()).collect(),
        uptime_seconds,
    }))
}
