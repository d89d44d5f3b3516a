//! 提交存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachments: Vec<String>,
    ) -> Result<Submission> {
        if self
            .get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await?
            .is_some()
        {
            return Err(PortalError::conflict("该作业已提交"));
        }

        let attachments = if attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&attachments)?)
        };

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content),
            attachments: Set(attachments),
            status: Set(SubmissionStatus::SUBMITTED.to_string()),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                PortalError::conflict("该作业已提交")
            } else {
                PortalError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生对某作业的提交
    async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出若干作业下的提交
    pub async fn list_submissions_by_assignments_impl(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select =
            Submissions::find().filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()));

        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let submissions = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 批量获取提交
    pub async fn list_submissions_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Submission>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let submissions = Submissions::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}
