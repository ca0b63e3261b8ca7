use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::error::DomainError;

/// Publication gate of an article.
///
/// Stored as an integer code. Codes other than Pending/Published read back
/// as `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Published,
    Declined,
}

impl ApprovalStatus {
    pub const fn code(self) -> i32 {
        match self {
            Self::Pending => 1,
            Self::Published => 2,
            Self::Declined => 3,
        }
    }

    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Pending,
            2 => Self::Published,
            _ => Self::Declined,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Published => "Published",
            Self::Declined => "Declined",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Pending, Self::Published, Self::Declined]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidArgument(format!("Unknown approval status '{s}'")))
    }
}

/// Outcome of an editor reviewing a reported article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Approved,
    Declined,
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidArgument(
                "Invalid status provided".to_string(),
            )),
        }
    }
}

/// One-to-one companion of an article holding its approval status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleApproval {
    pub id: Uuid,
    pub article_id: Uuid,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleApproval {
    pub fn new(article_id: Uuid, status: ApprovalStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            article_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn pending(article_id: Uuid) -> Self {
        Self::new(article_id, ApprovalStatus::Pending)
    }
}

impl Entity for ArticleApproval {
    const KIND: &'static str = "ArticleApproval";

    fn id(&self) -> Uuid {
        self.id
    }
}
