use serde::Serialize;

use super::entities::Submission;
use crate::models::grades::entities::Grade;
use crate::models::users::entities::UserBrief;

/// 提交详情（教师视角带学生与成绩）
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserBrief>,
    pub grade: Option<Grade>,
}
