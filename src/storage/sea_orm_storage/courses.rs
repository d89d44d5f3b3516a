//! 课程与选课存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::course_students::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as CourseStudents,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{PortalError, Result};
use crate::models::{
    courses::{
        entities::{Course, CourseBrief, CourseWithStudents},
        requests::CreateCourseRequest,
    },
    users::entities::UserBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

const DEFAULT_CREDITS: i32 = 3;

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            code: Set(req.code),
            credits: Set(req.credits.unwrap_or(DEFAULT_CREDITS)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                PortalError::conflict("课程代码已存在")
            } else {
                PortalError::database_operation(format!("创建课程失败: {e}"))
            }
        })?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程代码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出全部课程及其已选学生
    pub async fn list_courses_with_students_impl(&self) -> Result<Vec<CourseWithStudents>> {
        let rows = Courses::find()
            .find_with_related(Users)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(course, students)| CourseWithStudents {
                course: course.into_course(),
                students: students.into_iter().map(|s| s.into_brief()).collect(),
            })
            .collect())
    }

    /// 获取课程的已选学生
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<UserBrief>> {
        let students = Users::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::users::Relation::CourseStudents.def(),
            )
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_brief()).collect())
    }

    /// 列出学生已选课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::courses::Relation::CourseStudents.def(),
            )
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询已选课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 批量获取课程摘要
    pub async fn list_course_briefs_impl(&self, ids: &[i64]) -> Result<Vec<CourseBrief>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = Courses::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_brief()).collect())
    }

    /// 学生是否已选该课程
    pub(crate) async fn is_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let count = CourseStudents::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 选课
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<()> {
        if self.is_enrolled_impl(course_id, student_id).await? {
            return Err(PortalError::conflict("已选该课程"));
        }

        let model = EnrollmentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        // 并发选课时由唯一索引兜底
        model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                PortalError::conflict("已选该课程")
            } else {
                PortalError::database_operation(format!("选课失败: {e}"))
            }
        })?;

        Ok(())
    }
}
