use serde::Deserialize;

// 成绩列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

// 存储层成绩 upsert 请求，以 submission_id 为键
#[derive(Debug, Clone)]
pub struct UpsertGradeRequest {
    pub submission_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub score: f64,
    /// 新建成绩时使用的满分
    pub max_score: i32,
    /// 已有成绩时是否覆盖满分
    pub override_max_score: bool,
    pub feedback: Option<String>,
}
