pub mod create;
pub mod details;
pub mod get;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, GradeSubmissionRequest, SubmitAssignmentRequest,
};
use crate::storage::Storage;

pub use grade::grade_submission;
pub use submit::submit_assignment;

pub struct AssignmentService;

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from_request(request)
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    // 学生：已选课程的作业；教师：自己布置的作业
    pub async fn list_my_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_assignments(self, request).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, assignment_id).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, assignment_data).await
    }

    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submit_data: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, request, assignment_id, submit_data).await
    }

    pub async fn grade(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade(self, request, submission_id, grade_data).await
    }
}
