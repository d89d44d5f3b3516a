use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::GradeListQuery;
use crate::services::GradeService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn get_grade(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(&req, path.0).await
}

// 当前用户的学习表现（教师/管理员需指定学生）
pub async fn get_own_performance(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_performance(&req, None).await
}

pub async fn get_student_performance(
    req: HttpRequest,
    path: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_performance(&req, Some(path.0)).await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/grades")
            .wrap(middlewares::RequireJWT)
            // 权限在业务层检查（学生只能看自己的成绩）
            .service(web::resource("").route(web::get().to(list_grades)))
            .service(web::resource("/performance").route(web::get().to(get_own_performance)))
            .service(
                web::resource("/performance/{student_id}")
                    .route(web::get().to(get_student_performance)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_grade))),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use super::super::test_support::{TestContext, bearer};
    use crate::models::users::entities::UserRole;

    #[actix_web::test]
    async fn test_performance_requires_token() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri("/api/grades/performance")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_student_cannot_read_other_performance() {
        let ctx = TestContext::new().await;
        let student = ctx.user("s1@example.com", UserRole::Student).await;
        let other = ctx.user("s2@example.com", UserRole::Student).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/grades/performance/{}", other.id))
            .insert_header(bearer(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri(&format!("/api/grades/performance/{}", student.id))
            .insert_header(bearer(&student))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["studentId"], student.id);
        assert_eq!(body["overallAverage"], 0.0);
        assert_eq!(body["totalGrades"], 0);
    }

    #[actix_web::test]
    async fn test_teacher_must_name_student() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri("/api/grades/performance")
            .insert_header(bearer(&teacher))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_invalid_path_id_is_bad_request() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri("/api/grades/abc")
            .insert_header(bearer(&teacher))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
