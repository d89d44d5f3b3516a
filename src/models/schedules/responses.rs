use serde::Serialize;

use super::entities::Schedule;
use crate::models::courses::entities::CourseBrief;
use crate::models::users::entities::UserBrief;

/// 课表详情，附带课程与教师
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDetail {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub course: Option<CourseBrief>,
    pub teacher: Option<UserBrief>,
}
