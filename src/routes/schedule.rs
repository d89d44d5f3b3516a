use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ScheduleService 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListQuery>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .list_schedules(&req, query.into_inner())
        .await
}

pub async fn get_schedule(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.get_schedule(&req, path.0).await
}

pub async fn create_schedule(
    req: HttpRequest,
    body: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, body.into_inner())
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_schedule(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, path.0).await
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/schedule")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出课表 - 业务层按角色过滤
                    .route(web::get().to(list_schedules))
                    .route(
                        web::post()
                            .to(create_schedule)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_schedule))
                    .route(
                        web::put()
                            .to(update_schedule)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_schedule)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
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
    async fn test_schedule_mutations_follow_ownership() {
        let ctx = TestContext::new().await;
        let owner = ctx.user("owner@example.com", UserRole::Teacher).await;
        let other = ctx.user("other@example.com", UserRole::Teacher).await;
        let admin = ctx.user("root@example.com", UserRole::Admin).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&owner))
            .set_json(json!({"name": "Compilers", "code": "CS420"}))
            .to_request();
        let course: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .insert_header(bearer(&owner))
            .set_json(json!({
                "course_id": course["id"],
                "day_of_week": 1,
                "start_time": "9:00",
                "end_time": "10:30",
                "classroom": "A101"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let entry: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(entry["teacher_id"], owner.id);
        assert_eq!(entry["start_time"], "09:00:00");
        let uri = format!("/api/schedule/{}", entry["id"]);

        // 其他教师不能修改或删除
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&other))
            .set_json(json!({"classroom": "B202"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&other))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&owner))
            .set_json(json!({"classroom": "B202"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["classroom"], "B202");

        // 合并后的时段仍需 start < end
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&owner))
            .set_json(json!({"end_time": "08:00"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&admin))
            .set_json(json!({"day_of_week": 3}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["day_of_week"], 3);
        assert_eq!(updated["classroom"], "B202");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&owner))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_admin_must_name_teacher() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let admin = ctx.user("root@example.com", UserRole::Admin).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"name": "Graphics", "code": "CS450"}))
            .to_request();
        let course: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let slot = json!({
            "course_id": course["id"],
            "day_of_week": 2,
            "start_time": "13:00",
            "end_time": "14:00"
        });
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .insert_header(bearer(&admin))
            .set_json(&slot)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let mut named = slot.clone();
        named["teacher_id"] = json!(teacher.id);
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .insert_header(bearer(&admin))
            .set_json(&named)
            .to_request();
        let entry: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entry["teacher"]["id"], teacher.id);
    }
}
