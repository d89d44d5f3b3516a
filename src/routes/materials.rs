use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{
    CreateMaterialRequest, MaterialListQuery, UpdateMaterialRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::services::materials::download::serve_upload;
use crate::utils::SafeIDI64;

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListQuery>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, query.into_inner())
        .await
}

pub async fn get_material(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, path.0).await
}

pub async fn create_material(
    req: HttpRequest,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, body.into_inner())
        .await
}

pub async fn upload_material(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.upload_material(&req, payload).await
}

pub async fn update_material(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, path.0, body.into_inner())
        .await
}

pub async fn replace_material_file(
    req: HttpRequest,
    path: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.replace_file(&req, path.0, payload).await
}

pub async fn delete_material(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(&req, path.0).await
}

pub async fn download_material(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.download(&req, path.0).await
}

// 上传目录的公开访问
pub async fn get_upload(path: web::Path<String>) -> ActixResult<HttpResponse> {
    serve_upload(&path.into_inner()).await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_materials))
                    // 创建资料 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(create_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/upload")
                    .route(web::post().to(upload_material))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_material))
                    // 修改与删除 - 仅教师和管理员，归属在业务层检查
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/file")
                    .route(web::put().to(replace_material_file))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .service(web::resource("/{id}/download").route(web::get().to(download_material))),
    )
    .service(web::resource("/uploads/{filename}").route(web::get().to(get_upload)));
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::json;

    use super::super::test_support::{TestContext, bearer};
    use crate::models::users::entities::UserRole;

    const BOUNDARY: &str = "portal-material-boundary";

    fn multipart_body(fields: &[(&str, &str)], file_name: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_header() -> (header::HeaderName, String) {
        (
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
    }

    #[actix_web::test]
    async fn test_material_mutations_follow_ownership() {
        let ctx = TestContext::new().await;
        let owner = ctx.user("owner@example.com", UserRole::Teacher).await;
        let other = ctx.user("other@example.com", UserRole::Teacher).await;
        let admin = ctx.user("root@example.com", UserRole::Admin).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&owner))
            .set_json(json!({"name": "Databases", "code": "CS305"}))
            .to_request();
        let course: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/materials")
            .insert_header(bearer(&owner))
            .set_json(json!({"title": "Syllabus", "course_id": course["id"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let material: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(material["type"], "document");
        assert_eq!(material["teacher"]["id"], owner.id);
        let uri = format!("/api/materials/{}", material["id"]);

        // 其他教师不能修改或删除
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&other))
            .set_json(json!({"title": "Hijacked"}))
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
            .set_json(json!({"title": "Syllabus v2"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "Syllabus v2");

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&admin))
            .set_json(json!({"description": "reviewed"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "Syllabus v2");
        assert_eq!(updated["description"], "reviewed");

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
    async fn test_upload_checks_file_content() {
        let ctx = TestContext::new().await;
        let teacher = ctx.user("t@example.com", UserRole::Teacher).await;
        let student = ctx.user("s@example.com", UserRole::Student).await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({"name": "Networks", "code": "CS410"}))
            .to_request();
        let course: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let course_id = course["id"].to_string();

        // 扩展名允许但文件头不是 PDF
        let req = test::TestRequest::post()
            .uri("/api/materials/upload")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_header())
            .set_payload(multipart_body(
                &[("title", "Slides"), ("course_id", &course_id)],
                "slides.pdf",
                b"plain text pretending to be a pdf",
            ))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/materials/upload")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_header())
            .set_payload(multipart_body(&[("course_id", &course_id)], "run.exe", b"MZ"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/materials/upload")
            .insert_header(bearer(&student))
            .insert_header(multipart_header())
            .set_payload(multipart_body(&[], "notes.txt", b"notes"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::post()
            .uri("/api/materials/upload")
            .insert_header(bearer(&teacher))
            .insert_header(multipart_header())
            .set_payload(multipart_body(
                &[("title", "Reading list"), ("course_id", &course_id)],
                "reading.txt",
                b"chapter 1\nchapter 2\n",
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let material: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(material["file_name"], "reading.txt");
        assert_eq!(material["file_size"], 20);
        assert!(
            material["file_url"]
                .as_str()
                .is_some_and(|url| url.starts_with("/uploads/") && url.ends_with(".txt"))
        );

        // 删除资料同时清理落盘文件
        let req = test::TestRequest::delete()
            .uri(&format!("/api/materials/{}", material["id"]))
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
