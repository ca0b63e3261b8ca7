//! Join records linking a user to an article they acted on.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// Tag selecting which join table an [`Engagement`] lives in.
pub trait EngagementKind:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static
{
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Like;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Read;

impl EngagementKind for Like {
    const NAME: &'static str = "ArticleLike";
}

impl EngagementKind for Bookmark {
    const NAME: &'static str = "ArticleBookmark";
}

impl EngagementKind for Read {
    const NAME: &'static str = "ArticleRead";
}

/// A (user, article) action record of kind `K`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Engagement<K> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type ArticleLike = Engagement<Like>;
pub type ArticleBookmark = Engagement<Bookmark>;
pub type ArticleRead = Engagement<Read>;

impl<K: EngagementKind> Engagement<K> {
    pub fn new(user_id: Uuid, article_id: Uuid) -> Self {
        Self::from_parts(Uuid::new_v4(), user_id, article_id, Utc::now())
    }

    /// Rebuild a record loaded from storage.
    pub fn from_parts(
        id: Uuid,
        user_id: Uuid,
        article_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            article_id,
            created_at,
            kind: PhantomData,
        }
    }

    pub fn matches(&self, user_id: Uuid, article_id: Uuid) -> bool {
        self.user_id == user_id && self.article_id == article_id
    }
}

impl<K: EngagementKind> Entity for Engagement<K> {
    const KIND: &'static str = K::NAME;

    fn id(&self) -> Uuid {
        self.id
    }
}
