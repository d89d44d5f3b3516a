//! 数据模型定义
//!
//! 按业务域划分：entities 为业务实体，requests 为请求体/查询参数，responses 为响应体。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod grades;
pub mod materials;
pub mod schedules;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间，用于健康检查中的运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    UserEmailAlreadyExists = 2001,
    UserNotFound = 2004,

    // 课程
    CourseNotFound = 3004,
    CourseCodeAlreadyExists = 3009,
    CourseAlreadyEnrolled = 3010,

    // 作业、提交与成绩
    AssignmentNotFound = 4004,
    SubmissionNotFound = 4104,
    SubmissionAlreadyExists = 4109,
    GradeNotFound = 4204,

    // 课程资料与文件
    MaterialNotFound = 5004,
    FileNotFound = 5005,
    FileTypeNotAllowed = 5006,
    FileSizeExceeded = 5007,
    FileUploadFailed = 5008,
    MultifileUploadNotAllowed = 5009,

    // 课表
    ScheduleNotFound = 6004,
}
