use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, GradeSubmissionRequest, SubmitAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeIDI64, SafeSubmissionIdI64};

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 我的作业
pub async fn list_my_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_my_assignments(&req).await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

// 布置作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 提交作业
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit(&req, path.0, body.into_inner())
        .await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assignments))
                    // 布置作业 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(web::resource("/my").route(web::get().to(list_my_assignments)))
            // 评分 - 仅教师和管理员
            .service(
                web::resource("/submissions/{submission_id}/grade")
                    .route(web::post().to(grade_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .service(web::resource("/{id}").route(web::get().to(get_assignment)))
            // 提交作业 - 仅学生
            .service(
                web::resource("/{id}/submit")
                    .route(web::post().to(submit_assignment))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    use super::super::test_support::{TestContext, bearer};
    use crate::models::users::entities::UserRole;

    #[actix_web::test]
    async fn test_submit_then_grade_flow() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let student = ctx.user("s@example.com", UserRole::Student).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"name": "Algorithms", "code": "CS201"}))
            .to_request();
        let course: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(course["credits"], 3);

        let req = test::TestRequest::post()
            .uri(&format!("/api/courses/{}/enroll", course["id"]))
            .insert_header(bearer(&student))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/assignments")
            .insert_header(bearer(&teacher))
            .set_json(json!({
                "title": "Sorting",
                "course_id": course["id"],
                "due_date": "2030-01-01T00:00:00Z",
                "max_score": 50
            }))
            .to_request();
        let assignment: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(assignment["max_score"], 50);

        let submit_uri = format!("/api/assignments/{}/submit", assignment["id"]);
        let req = test::TestRequest::post()
            .uri(&submit_uri)
            .insert_header(bearer(&student))
            .set_json(json!({"content": "quicksort"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let submission: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(submission["status"], "submitted");

        let req = test::TestRequest::post()
            .uri(&submit_uri)
            .insert_header(bearer(&student))
            .set_json(json!({"content": "again"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CONFLICT
        );

        let grade_uri = format!("/api/assignments/submissions/{}/grade", submission["id"]);
        let req = test::TestRequest::post()
            .uri(&grade_uri)
            .insert_header(bearer(&teacher))
            .set_json(json!({"score": 60}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri(&grade_uri)
            .insert_header(bearer(&teacher))
            .set_json(json!({"score": 45, "feedback": "nice"}))
            .to_request();
        let grade: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(grade["score"], 45.0);
        assert_eq!(grade["max_score"], 50);
        assert_eq!(grade["submission"]["status"], "graded");
        assert_eq!(grade["student"]["id"], student.id);

        let req = test::TestRequest::get()
            .uri("/api/grades/performance")
            .insert_header(bearer(&student))
            .to_request();
        let performance: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(performance["overallAverage"], 90.0);
        assert_eq!(performance["coursePerformance"][0]["course"]["code"], "CS201");
    }

    #[actix_web::test]
    async fn test_role_gates() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let student = ctx.user("s@example.com", UserRole::Student).await;
        let app = test::init_service(ctx.app()).await;

        // 学生不能布置作业
        let req = test::TestRequest::post()
            .uri("/api/assignments")
            .insert_header(bearer(&student))
            .set_json(json!({
                "title": "x",
                "course_id": 1,
                "due_date": "2030-01-01T00:00:00Z"
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        // 教师不能提交作业
        let req = test::TestRequest::post()
            .uri("/api/assignments/1/submit")
            .insert_header(bearer(&teacher))
            .set_json(json!({}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::post()
            .uri("/api/assignments/999/submit")
            .insert_header(bearer(&student))
            .set_json(json!({}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/assignments/submissions/1/grade")
            .insert_header(bearer(&teacher))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
