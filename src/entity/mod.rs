//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod course_students;
pub mod courses;
pub mod grades;
pub mod materials;
pub mod schedules;
pub mod submissions;
pub mod users;

use chrono::{DateTime, Utc};

/// 将数据库中的 unix 秒转换为 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 解析以 JSON 数组文本存储的附件列表
pub(crate) fn parse_attachments(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachments() {
        assert_eq!(
            parse_attachments(Some(r#"["a.pdf","b.png"]"#.to_string())),
            vec!["a.pdf".to_string(), "b.png".to_string()]
        );
        assert!(parse_attachments(None).is_empty());
        assert!(parse_attachments(Some("not json".to_string())).is_empty());
    }

    #[test]
    fn test_from_timestamp() {
        assert_eq!(from_timestamp(0).timestamp(), 0);
        assert_eq!(from_timestamp(1_700_000_000).timestamp(), 1_700_000_000);
    }
}
