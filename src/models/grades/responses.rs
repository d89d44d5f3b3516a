use serde::Serialize;

use super::entities::Grade;
use crate::models::courses::entities::CourseBrief;
use crate::models::submissions::entities::SubmissionBrief;
use crate::models::users::entities::UserBrief;

/// 成绩详情，附带学生、课程与提交摘要
#[derive(Debug, Clone, Serialize)]
pub struct GradeDetail {
    #[serde(flatten)]
    pub grade: Grade,
    pub student: Option<UserBrief>,
    pub course: Option<CourseBrief>,
    pub submission: Option<SubmissionBrief>,
}

/// 单门课程的学习表现
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoursePerformance {
    pub course: Option<CourseBrief>,
    pub average_score: f64,
    pub grades: Vec<f64>,
}

/// 学生整体学习表现
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub student_id: i64,
    pub overall_average: f64,
    pub course_performance: Vec<CoursePerformance>,
    pub total_grades: usize,
}
