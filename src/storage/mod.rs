use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::{Course, CourseBrief, CourseWithStudents},
        requests::CreateCourseRequest,
    },
    grades::{
        entities::Grade,
        requests::{GradeListQuery, UpsertGradeRequest},
    },
    materials::{
        entities::Material,
        requests::{NewMaterial, StoredFile, UpdateMaterialRequest},
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest},
    },
    submissions::entities::Submission,
    users::{
        entities::{User, UserBrief},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户资料
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 批量获取用户摘要
    async fn list_user_briefs(&self, ids: &[i64]) -> Result<Vec<UserBrief>>;

    /// 课程管理方法
    // 创建课程（课程代码重复时返回 Conflict）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 列出全部课程及其学生
    async fn list_courses_with_students(&self) -> Result<Vec<CourseWithStudents>>;
    // 获取课程的已选学生
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<UserBrief>>;
    // 列出学生已选课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 批量获取课程摘要
    async fn list_course_briefs(&self, ids: &[i64]) -> Result<Vec<CourseBrief>>;
    // 选课（重复选课返回 Conflict）
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出作业，按截止时间升序
    async fn list_assignments(&self, course_id: Option<i64>) -> Result<Vec<Assignment>>;
    // 列出若干课程下的作业
    async fn list_assignments_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Assignment>>;
    // 列出教师创建的作业
    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 创建提交（同一学生同一作业重复提交返回 Conflict）
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachments: Vec<String>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出若干作业下的提交，可按学生过滤
    async fn list_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>>;

    /// 成绩管理方法
    // 按提交 upsert 成绩并将提交标记为已评分（单事务）
    async fn upsert_grade(&self, grade: UpsertGradeRequest) -> Result<Grade>;
    // 通过ID获取成绩
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    // 通过提交ID获取成绩
    async fn get_grade_by_submission_id(&self, submission_id: i64) -> Result<Option<Grade>>;
    // 批量获取提交对应的成绩
    async fn list_grades_by_submissions(&self, submission_ids: &[i64]) -> Result<Vec<Grade>>;
    // 列出成绩，按评分时间降序
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>>;
    // 获取学生全部成绩及对应课程，按成绩ID升序
    async fn list_student_grades_with_course(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Grade, Option<CourseBrief>)>>;
    // 批量获取提交
    async fn list_submissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Submission>>;

    /// 课程资料管理方法
    // 创建资料
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    // 通过ID获取资料
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    // 列出资料，按创建时间降序
    async fn list_materials(&self, course_id: Option<i64>) -> Result<Vec<Material>>;
    // 更新资料信息
    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    // 替换资料文件
    async fn replace_material_file(
        &self,
        material_id: i64,
        file: StoredFile,
    ) -> Result<Option<Material>>;
    // 删除资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;

    /// 课表管理方法
    // 创建课表条目
    async fn create_schedule(
        &self,
        teacher_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<Schedule>;
    // 通过ID获取课表条目
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<Schedule>>;
    // 列出课表，按星期与开始时间排序
    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>>;
    // 更新课表条目
    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>>;
    // 删除课表条目
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
