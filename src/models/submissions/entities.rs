use serde::{Deserialize, Serialize};

// 提交状态：submitted -> graded 为单向流转
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted, // 已提交
    Graded,    // 已评分
    Returned,  // 已退回
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";
    pub const RETURNED: &'static str = "returned";
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
            SubmissionStatus::Returned => write!(f, "{}", SubmissionStatus::RETURNED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            SubmissionStatus::RETURNED => Ok(SubmissionStatus::Returned),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub attachments: Vec<String>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 嵌入在成绩中的提交摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionBrief {
    pub id: i64,
    pub assignment_id: i64,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn brief(&self) -> SubmissionBrief {
        SubmissionBrief {
            id: self.id,
            assignment_id: self.assignment_id,
            status: self.status,
            submitted_at: self.submitted_at,
        }
    }
}
