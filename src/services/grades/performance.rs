//! 学习表现统计
//!
//! 每次请求基于学生的全部成绩重新计算，不做缓存。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::courses::entities::CourseBrief;
use crate::models::grades::{
    entities::Grade,
    responses::{CoursePerformance, PerformanceSummary},
};
use crate::services::{access, current_user};

/// 得分率（百分制），保留两位小数；满分合计为 0 时记为 0
fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    (score / max_score * 100.0 * 100.0).round() / 100.0
}

struct CourseTotals {
    course_id: i64,
    course: Option<CourseBrief>,
    score: f64,
    max_score: f64,
    grades: Vec<f64>,
}

/// 汇总学生成绩，课程按首次出现的顺序排列
pub fn compute_performance(
    student_id: i64,
    rows: &[(Grade, Option<CourseBrief>)],
) -> PerformanceSummary {
    let mut total_score = 0.0;
    let mut total_max = 0.0;
    let mut courses: Vec<CourseTotals> = Vec::new();

    for (grade, course) in rows {
        let max_score = f64::from(grade.max_score);
        total_score += grade.score;
        total_max += max_score;

        let idx = match courses.iter().position(|c| c.course_id == grade.course_id) {
            Some(idx) => idx,
            None => {
                courses.push(CourseTotals {
                    course_id: grade.course_id,
                    course: course.clone(),
                    score: 0.0,
                    max_score: 0.0,
                    grades: Vec::new(),
                });
                courses.len() - 1
            }
        };

        let totals = &mut courses[idx];
        totals.score += grade.score;
        totals.max_score += max_score;
        totals.grades.push(grade.score);
    }

    PerformanceSummary {
        student_id,
        overall_average: percentage(total_score, total_max),
        course_performance: courses
            .into_iter()
            .map(|c| CoursePerformance {
                average_score: percentage(c.score, c.max_score),
                course: c.course,
                grades: c.grades,
            })
            .collect(),
        total_grades: rows.len(),
    }
}

pub async fn get_performance(
    service: &GradeService,
    request: &HttpRequest,
    path_student_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let student_id = access::performance_target(&actor, path_student_id)?;
    let rows = storage.list_student_grades_with_course(student_id).await?;

    Ok(HttpResponse::Ok().json(compute_performance(student_id, &rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(id: i64, course_id: i64, score: f64, max_score: i32) -> Grade {
        Grade {
            id,
            student_id: 7,
            course_id,
            submission_id: Some(id),
            score,
            max_score,
            feedback: None,
            graded_at: chrono::Utc::now(),
        }
    }

    fn brief(id: i64, code: &str) -> Option<CourseBrief> {
        Some(CourseBrief {
            id,
            name: format!("Course {code}"),
            code: code.to_string(),
        })
    }

    #[test]
    fn test_overall_average_rounds_to_two_decimals() {
        let rows = vec![
            (grade(1, 1, 75.0, 100), brief(1, "CS101")),
            (grade(2, 2, 50.0, 50), brief(2, "MA201")),
        ];

        let summary = compute_performance(7, &rows);
        assert_eq!(summary.overall_average, 83.33);
        assert_eq!(summary.total_grades, 2);
        assert_eq!(summary.course_performance[0].average_score, 75.0);
        assert_eq!(summary.course_performance[1].average_score, 100.0);
    }

    #[test]
    fn test_zero_max_score_yields_zero() {
        let rows = vec![(grade(1, 1, 0.0, 0), brief(1, "CS101"))];

        let summary = compute_performance(7, &rows);
        assert_eq!(summary.overall_average, 0.0);
        assert_eq!(summary.course_performance[0].average_score, 0.0);
    }

    #[test]
    fn test_no_grades() {
        let summary = compute_performance(7, &[]);
        assert_eq!(summary.overall_average, 0.0);
        assert!(summary.course_performance.is_empty());
        assert_eq!(summary.total_grades, 0);
    }

    #[test]
    fn test_courses_keep_first_seen_order() {
        let rows = vec![
            (grade(1, 2, 40.0, 50), brief(2, "MA201")),
            (grade(2, 1, 90.0, 100), brief(1, "CS101")),
            (grade(3, 2, 30.0, 50), brief(2, "MA201")),
        ];

        let summary = compute_performance(7, &rows);
        let codes: Vec<_> = summary
            .course_performance
            .iter()
            .map(|c| c.course.as_ref().map(|b| b.code.as_str()))
            .collect();
        assert_eq!(codes, vec![Some("MA201"), Some("CS101")]);
        assert_eq!(summary.course_performance[0].grades, vec![40.0, 30.0]);
        assert_eq!(summary.course_performance[0].average_score, 70.0);
    }

    #[test]
    fn test_json_shape() {
        let summary = compute_performance(7, &[(grade(1, 1, 9.0, 10), brief(1, "CS101"))]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["studentId"], 7);
        assert_eq!(json["overallAverage"], 90.0);
        assert_eq!(json["totalGrades"], 1);
        assert_eq!(json["coursePerformance"][0]["course"]["code"], "CS101");
        assert_eq!(json["coursePerformance"][0]["averageScore"], 90.0);
    }
}
