use serde::Deserialize;

// 创建课表请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    pub course_id: i64,
    pub day_of_week: i16,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub classroom: Option<String>,
    pub group_name: Option<String>,
    /// 仅管理员创建时使用
    pub teacher_id: Option<i64>,
}

// 更新课表请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub course_id: Option<i64>,
    pub day_of_week: Option<i16>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub classroom: Option<String>,
    pub group_name: Option<String>,
}

// 课表列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleListQuery {
    pub day_of_week: Option<i16>,
    pub group_name: Option<String>,
    pub course_id: Option<i64>,
}

// 存储层过滤条件（已合并角色限制）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleFilter {
    pub day_of_week: Option<i16>,
    pub group_name: Option<String>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
