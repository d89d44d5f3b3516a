pub mod details;
pub mod get;
pub mod list;
pub mod performance;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::grades::requests::GradeListQuery;
use crate::storage::Storage;

pub use details::grade_details;
pub use performance::compute_performance;

pub struct GradeService;

impl GradeService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from_request(request)
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn get_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, grade_id).await
    }

    // 学习表现统计，路径中的学生 ID 可选
    pub async fn get_performance(
        &self,
        request: &HttpRequest,
        student_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        performance::get_performance(self, request, student_id).await
    }
}
