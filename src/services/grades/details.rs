use crate::errors::Result;
use crate::models::grades::{entities::Grade, responses::GradeDetail};
use crate::services::{course_brief_map, user_brief_map};
use crate::storage::Storage;

/// 为成绩批量附加学生、课程与提交摘要，保持输入顺序
pub async fn grade_details(storage: &dyn Storage, grades: Vec<Grade>) -> Result<Vec<GradeDetail>> {
    if grades.is_empty() {
        return Ok(Vec::new());
    }

    let students = user_brief_map(storage, grades.iter().map(|g| g.student_id)).await?;
    let courses = course_brief_map(storage, grades.iter().map(|g| g.course_id)).await?;

    let submission_ids: Vec<i64> = grades.iter().filter_map(|g| g.submission_id).collect();
    let submissions = storage.list_submissions_by_ids(&submission_ids).await?;

    Ok(grades
        .into_iter()
        .map(|grade| GradeDetail {
            student: students.get(&grade.student_id).cloned(),
            course: courses.get(&grade.course_id).cloned(),
            submission: grade.submission_id.and_then(|id| {
                submissions.iter().find(|s| s.id == id).map(|s| s.brief())
            }),
            grade,
        })
        .collect())
}
