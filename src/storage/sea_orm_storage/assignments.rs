//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{PortalError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

const DEFAULT_MAX_SCORE: i32 = 100;

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let attachments = if req.attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&req.attachments)?)
        };

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            course_id: Set(req.course_id),
            teacher_id: Set(teacher_id),
            due_date: Set(req.due_date.timestamp()),
            max_score: Set(req.max_score.unwrap_or(DEFAULT_MAX_SCORE)),
            attachments: Set(attachments),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出作业，按截止时间升序
    pub async fn list_assignments_impl(&self, course_id: Option<i64>) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let assignments = select
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出若干课程下的作业
    pub async fn list_assignments_by_courses_impl(
        &self,
        course_ids: &[i64],
    ) -> Result<Vec<Assignment>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = Assignments::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出教师创建的作业
    pub async fn list_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::models::{
        assignments::requests::CreateAssignmentRequest, users::entities::UserRole,
    };
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_list_assignments_ordered_by_due_date() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let course = fixtures::course(&storage, "CS101").await;
        let other = fixtures::course(&storage, "CS102").await;

        let now = chrono::Utc::now();
        for (title, days, course_id) in [("late", 9, course.id), ("early", 2, course.id), ("x", 1, other.id)] {
            storage
                .create_assignment(
                    teacher.id,
                    CreateAssignmentRequest {
                        title: title.into(),
                        description: None,
                        course_id,
                        due_date: now + chrono::Duration::days(days),
                        max_score: None,
                        attachments: vec!["brief.pdf".into()],
                    },
                )
                .await
                .unwrap();
        }

        let listed = storage.list_assignments(Some(course.id)).await.unwrap();
        assert_eq!(
            listed.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
            vec!["early", "late"]
        );
        assert_eq!(listed[0].max_score, 100);
        assert_eq!(listed[0].attachments, vec!["brief.pdf".to_string()]);

        assert_eq!(storage.list_assignments(None).await.unwrap().len(), 3);
        assert_eq!(
            storage
                .list_assignments_by_courses(&[other.id])
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            storage
                .list_assignments_by_teacher(teacher.id)
                .await
                .unwrap()
                .len(),
            3
        );
    }
}
