use std::collections::HashMap;

use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, responses::AssignmentDetail};
use crate::models::submissions::{entities::Submission, responses::SubmissionDetail};
use crate::services::{course_brief_map, user_brief_map};
use crate::storage::Storage;

/// 为提交附加成绩，`with_student` 时同时附加学生摘要
pub(crate) async fn submission_details(
    storage: &dyn Storage,
    submissions: Vec<Submission>,
    with_student: bool,
) -> Result<Vec<SubmissionDetail>> {
    let ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();
    let mut grades: HashMap<i64, _> = storage
        .list_grades_by_submissions(&ids)
        .await?
        .into_iter()
        .filter_map(|g| g.submission_id.map(|id| (id, g)))
        .collect();

    let students = if with_student {
        user_brief_map(storage, submissions.iter().map(|s| s.student_id)).await?
    } else {
        HashMap::new()
    };

    Ok(submissions
        .into_iter()
        .map(|submission| SubmissionDetail {
            student: students.get(&submission.student_id).cloned(),
            grade: grades.remove(&submission.id),
            submission,
        })
        .collect())
}

/// 为作业附加课程与教师摘要；`submissions` 按作业 ID 分组后挂到对应作业上
pub(crate) async fn assignment_details(
    storage: &dyn Storage,
    assignments: Vec<Assignment>,
    mut submissions: Option<HashMap<i64, Vec<SubmissionDetail>>>,
) -> Result<Vec<AssignmentDetail>> {
    let courses = course_brief_map(storage, assignments.iter().map(|a| a.course_id)).await?;
    let teachers = user_brief_map(storage, assignments.iter().map(|a| a.teacher_id)).await?;

    Ok(assignments
        .into_iter()
        .map(|assignment| AssignmentDetail {
            course: courses.get(&assignment.course_id).cloned(),
            teacher: teachers.get(&assignment.teacher_id).cloned(),
            submissions: submissions
                .as_mut()
                .map(|by_assignment| by_assignment.remove(&assignment.id).unwrap_or_default()),
            assignment,
        })
        .collect())
}

/// 按作业 ID 分组提交详情
pub(crate) fn group_by_assignment(
    details: Vec<SubmissionDetail>,
) -> HashMap<i64, Vec<SubmissionDetail>> {
    let mut grouped: HashMap<i64, Vec<SubmissionDetail>> = HashMap::new();
    for detail in details {
        grouped
            .entry(detail.submission.assignment_id)
            .or_default()
            .push(detail);
    }
    grouped
}
