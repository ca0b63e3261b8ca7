use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// A reader's comment on an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(article_id: Uuid, user_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id,
            user_id,
            text,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> Uuid {
        self.id
    }
}
