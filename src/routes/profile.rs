use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::services::AuthService;

static PROFILE_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn get_profile(request: HttpRequest) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_profile(&request).await
}

pub async fn update_profile(
    request: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.update_profile(body.into_inner(), &request).await
}

// 配置路由
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profile")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/me")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            ),
    );
}
