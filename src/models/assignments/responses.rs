use serde::Serialize;

use super::entities::Assignment;
use crate::models::courses::entities::CourseBrief;
use crate::models::submissions::responses::SubmissionDetail;
use crate::models::users::entities::UserBrief;

/// 作业详情，附带课程、教师以及可见的提交
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub course: Option<CourseBrief>,
    pub teacher: Option<UserBrief>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<SubmissionDetail>>,
}
