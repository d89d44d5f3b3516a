use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn list_my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_my_courses(&req).await
}

pub async fn get_course(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

pub async fn enroll(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, path.0).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    // 创建课程 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 需在 /{id} 之前注册
            .service(web::resource("/my").route(web::get().to(list_my_courses)))
            .service(web::resource("/{id}").route(web::get().to(get_course)))
            // 选课 - 仅学生
            .service(
                web::resource("/{id}/enroll")
                    .route(web::post().to(enroll))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            ),
    );
}
