pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::schedules::{
    entities::Schedule,
    requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
    responses::ScheduleDetail,
};
use crate::services::{course_brief_map, user_brief_map};
use crate::storage::Storage;

pub struct ScheduleService;

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from_request(request)
    }

    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        query: ScheduleListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, query).await
    }

    pub async fn get_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_schedule(self, request, schedule_id).await
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        schedule_data: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, schedule_data).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        update_data: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, request, schedule_id, update_data).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, schedule_id).await
    }
}

/// 为课表条目附加课程与教师摘要
pub(crate) async fn schedule_details(
    storage: &dyn Storage,
    schedules: Vec<Schedule>,
) -> Result<Vec<ScheduleDetail>> {
    let courses = course_brief_map(storage, schedules.iter().map(|s| s.course_id)).await?;
    let teachers = user_brief_map(storage, schedules.iter().map(|s| s.teacher_id)).await?;

    Ok(schedules
        .into_iter()
        .map(|schedule| ScheduleDetail {
            course: courses.get(&schedule.course_id).cloned(),
            teacher: teachers.get(&schedule.teacher_id).cloned(),
            schedule,
        })
        .collect())
}
