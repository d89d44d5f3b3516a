//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::{
    courses::entities::CourseBrief,
    grades::{
        entities::Grade,
        requests::{GradeListQuery, UpsertGradeRequest},
    },
    submissions::entities::SubmissionStatus,
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 按提交 upsert 成绩，并在同一事务内把提交标记为已评分
    ///
    /// 已有成绩行在事务内加锁后再按有效满分校验分数，并发重复评分不会绕过满分限制。
    pub async fn upsert_grade_impl(&self, req: UpsertGradeRequest) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        // 重复评分覆盖分数、评语与评分时间，满分仅在显式提供时覆盖
        let mut update_columns = vec![Column::Score, Column::Feedback, Column::GradedAt];
        if req.override_max_score {
            update_columns.push(Column::MaxScore);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let existing_max = Grades::find()
            .filter(Column::SubmissionId.eq(req.submission_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?
            .map(|g| g.max_score);
        let max_score = match existing_max {
            Some(existing) if !req.override_max_score => existing,
            _ => req.max_score,
        };
        if req.score > f64::from(max_score) {
            return Err(PortalError::validation(format!(
                "分数不能超过满分 {max_score}"
            )));
        }

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            submission_id: Set(Some(req.submission_id)),
            score: Set(req.score),
            max_score: Set(req.max_score),
            feedback: Set(req.feedback),
            graded_at: Set(now),
            ..Default::default()
        };

        Grades::insert(model)
            .on_conflict(
                OnConflict::column(Column::SubmissionId)
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("保存成绩失败: {e}")))?;

        Submissions::update_many()
            .col_expr(
                SubmissionColumn::Status,
                Expr::value(SubmissionStatus::GRADED),
            )
            .filter(SubmissionColumn::Id.eq(req.submission_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新提交状态失败: {e}")))?;

        // 冲突更新时 last_insert_id 不可靠，按提交 ID 回查
        let grade = Grades::find()
            .filter(Column::SubmissionId.eq(req.submission_id))
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?
            .ok_or_else(|| PortalError::database_operation("保存成绩后未找到记录"))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(grade.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过提交 ID 获取成绩
    pub async fn get_grade_by_submission_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 批量获取提交对应的成绩
    pub async fn list_grades_by_submissions_impl(
        &self,
        submission_ids: &[i64],
    ) -> Result<Vec<Grade>> {
        if submission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let grades = Grades::find()
            .filter(Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 列出成绩，按评分时间降序
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        let mut select = Grades::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let grades = select
            .order_by_desc(Column::GradedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 获取学生全部成绩及对应课程，按成绩 ID 升序
    pub async fn list_student_grades_with_course_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Grade, Option<CourseBrief>)>> {
        let rows = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Courses)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(grade, course)| (grade.into_grade(), course.map(|c| c.into_brief())))
            .collect())
    }
}
