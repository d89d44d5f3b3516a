//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod grades;
mod materials;
mod schedules;
mod submissions;
mod users;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::migrate(db).await?;
        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(storage)
    }

    /// 创建内存 SQLite 存储（单连接，进程退出即丢弃）
    pub async fn new_in_memory() -> Result<Self> {
        let db = Self::connect_sqlite(SQLITE_MEMORY_URL, 1, 5).await?;
        Self::migrate(db).await
    }

    /// 运行迁移
    async fn migrate(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        // 内存数据库每个连接都是独立的库，只能使用单连接且不能回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok(SQLITE_MEMORY_URL.to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 判断是否为唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_user_briefs(&self, ids: &[i64]) -> Result<Vec<UserBrief>> {
        self.list_user_briefs_impl(ids).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn list_courses_with_students(&self) -> Result<Vec<CourseWithStudents>> {
        self.list_courses_with_students_impl().await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Vec<UserBrief>> {
        self.list_course_students_impl(course_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn list_course_briefs(&self, ids: &[i64]) -> Result<Vec<CourseBrief>> {
        self.list_course_briefs_impl(ids).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()> {
        self.enroll_student_impl(course_id, student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments(&self, course_id: Option<i64>) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(course_id).await
    }

    async fn list_assignments_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_courses_impl(course_ids).await
    }

    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_teacher_impl(teacher_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachments: Vec<String>,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, content, attachments)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignments_impl(assignment_ids, student_id)
            .await
    }

    async fn list_submissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Submission>> {
        self.list_submissions_by_ids_impl(ids).await
    }

    // 成绩模块
    async fn upsert_grade(&self, grade: UpsertGradeRequest) -> Result<Grade> {
        self.upsert_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(grade_id).await
    }

    async fn get_grade_by_submission_id(&self, submission_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_submission_id_impl(submission_id).await
    }

    async fn list_grades_by_submissions(&self, submission_ids: &[i64]) -> Result<Vec<Grade>> {
        self.list_grades_by_submissions_impl(submission_ids).await
    }

    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        self.list_grades_impl(query).await
    }

    async fn list_student_grades_with_course(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Grade, Option<CourseBrief>)>> {
        self.list_student_grades_with_course_impl(student_id).await
    }

    // 资料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(material_id).await
    }

    async fn list_materials(&self, course_id: Option<i64>) -> Result<Vec<Material>> {
        self.list_materials_impl(course_id).await
    }

    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        self.update_material_impl(material_id, update).await
    }

    async fn replace_material_file(
        &self,
        material_id: i64,
        file: StoredFile,
    ) -> Result<Option<Material>> {
        self.replace_material_file_impl(material_id, file).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }

    // 课表模块
    async fn create_schedule(
        &self,
        teacher_id: i64,
        schedule: CreateScheduleRequest,
    ) -> Result<Schedule> {
        self.create_schedule_impl(teacher_id, schedule).await
    }

    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(schedule_id).await
    }

    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>> {
        self.list_schedules_impl(filter).await
    }

    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        self.update_schedule_impl(schedule_id, update).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }
}
