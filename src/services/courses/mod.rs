pub mod create;
pub mod enroll;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::requests::CreateCourseRequest;
use crate::storage::Storage;

pub struct CourseService;

impl CourseService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from_request(request)
    }

    // 全部课程及选课学生
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 当前用户已选课程
    pub async fn list_my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_courses(self, request).await
    }

    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, course_id).await
    }
}
