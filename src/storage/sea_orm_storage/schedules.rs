//! 课表存储操作

use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{PortalError, Result};
use crate::models::schedules::{
    entities::Schedule,
    requests::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课表条目（时间已由上层规范化为 HH:MM:SS）
    pub async fn create_schedule_impl(
        &self,
        teacher_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<Schedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            teacher_id: Set(teacher_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            classroom: Set(req.classroom),
            group_name: Set(req.group_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建课表失败: {e}")))?;

        Ok(result.into_schedule())
    }

    /// 通过 ID 获取课表条目
    pub async fn get_schedule_by_id_impl(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 列出课表，按星期与开始时间排序
    pub async fn list_schedules_impl(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>> {
        let mut select = Schedules::find();

        if let Some(day) = filter.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }
        if let Some(group_name) = filter.group_name {
            select = select.filter(Column::GroupName.eq(group_name));
        }
        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let schedules = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(schedules.into_iter().map(|m| m.into_schedule()).collect())
    }

    /// 更新课表条目
    pub async fn update_schedule_impl(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        if self.get_schedule_by_id_impl(schedule_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(schedule_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(day) = update.day_of_week {
            model.day_of_week = Set(day);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(classroom) = update.classroom {
            model.classroom = Set(Some(classroom));
        }
        if let Some(group_name) = update.group_name {
            model.group_name = Set(Some(group_name));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新课表失败: {e}")))?;

        Ok(Some(result.into_schedule()))
    }

    /// 删除课表条目
    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::models::{
        schedules::requests::{CreateScheduleRequest, ScheduleFilter},
        users::entities::UserRole,
    };
    use crate::storage::Storage;

    fn slot(course_id: i64, day: i16, start: &str, end: &str, group: &str) -> CreateScheduleRequest {
        CreateScheduleRequest {
            course_id,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            classroom: Some("A-101".into()),
            group_name: Some(group.into()),
            teacher_id: None,
        }
    }

    #[tokio::test]
    async fn test_schedule_ordering_and_filters() {
        let storage = fixtures::storage().await;
        let teacher = fixtures::user(&storage, "t@example.com", UserRole::Teacher).await;
        let course = fixtures::course(&storage, "CS101").await;

        for req in [
            slot(course.id, 2, "10:00:00", "11:30:00", "G1"),
            slot(course.id, 1, "14:00:00", "15:30:00", "G2"),
            slot(course.id, 1, "08:30:00", "10:00:00", "G1"),
        ] {
            storage.create_schedule(teacher.id, req).await.unwrap();
        }

        let all = storage
            .list_schedules(ScheduleFilter::default())
            .await
            .unwrap();
        assert_eq!(
            all.iter()
                .map(|s| (s.day_of_week, s.start_time.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "08:30:00"), (1, "14:00:00"), (2, "10:00:00")]
        );

        let g1_monday = storage
            .list_schedules(ScheduleFilter {
                day_of_week: Some(1),
                group_name: Some("G1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(g1_monday.len(), 1);
        assert_eq!(g1_monday[0].end_time, "10:00:00");

        assert!(storage.delete_schedule(all[0].id).await.unwrap());
        assert_eq!(
            storage
                .list_schedules(ScheduleFilter::default())
                .await
                .unwrap()
                .len(),
            2
        );
    }
}
