use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

// 配置路由（无需认证）
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health));
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use super::super::test_support::TestContext;

    #[actix_web::test]
    async fn test_health_is_public() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "OK");
        assert!(
            body["modules"]
                .as_array()
                .is_some_and(|m| m.iter().any(|v| v == "grades"))
        );
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
