use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// A named category; many articles point at one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ArticleTag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

impl Entity for ArticleTag {
    const KIND: &'static str = "ArticleTag";

    fn id(&self) -> Uuid {
        self.id
    }
}
