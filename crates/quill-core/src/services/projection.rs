//! Projection of articles into the denormalized listing rows.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use quill_shared::dto::{ArticleSummary, CommentDto};

use crate::domain::{AppUser, Article, ArticleTag, Comment};
use crate::error::RepoError;
use crate::ports::Repositories;

/// Resolves authors and tags for a batch of articles, fetching each id once.
pub(crate) struct Lookup<'a> {
    repos: &'a Repositories,
    users: HashMap<Uuid, Option<AppUser>>,
    tags: HashMap<Uuid, Option<ArticleTag>>,
}

impl<'a> Lookup<'a> {
    pub(crate) fn new(repos: &'a Repositories) -> Self {
        Self {
            repos,
            users: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    pub(crate) async fn user(&mut self, id: Uuid) -> Result<Option<AppUser>, RepoError> {
        if let Some(cached) = self.users.get(&id) {
            return Ok(cached.clone());
        }
        let found = self.repos.users.find_by_id(id).await?;
        self.users.insert(id, found.clone());
        Ok(found)
    }

    pub(crate) async fn tag(&mut self, id: Uuid) -> Result<Option<ArticleTag>, RepoError> {
        if let Some(cached) = self.tags.get(&id) {
            return Ok(cached.clone());
        }
        let found = self.repos.tags.find_by_id(id).await?;
        self.tags.insert(id, found.clone());
        Ok(found)
    }

    pub(crate) async fn summarize(&mut self, article: Article) -> Result<ArticleSummary, RepoError> {
        let author = match article.author_id {
            Some(author_id) => self.user(author_id).await?,
            None => None,
        };
        let tag = self.tag(article.tag_id).await?;
        Ok(summary(article, author.as_ref(), tag.as_ref()))
    }

    pub(crate) async fn summarize_all(
        &mut self,
        articles: Vec<Article>,
    ) -> Result<Vec<ArticleSummary>, RepoError> {
        let mut rows = Vec::with_capacity(articles.len());
        for article in articles {
            rows.push(self.summarize(article).await?);
        }
        Ok(rows)
    }

    pub(crate) async fn comment(&mut self, comment: Comment) -> Result<CommentDto, RepoError> {
        let user = self.user(comment.user_id).await?;
        Ok(CommentDto {
            id: comment.id,
            name: user.as_ref().map(AppUser::full_name).unwrap_or_default(),
            image: user.and_then(|u| u.image_url),
            text: comment.text,
            created_at: comment.created_at,
        })
    }
}

fn summary(article: Article, author: Option<&AppUser>, tag: Option<&ArticleTag>) -> ArticleSummary {
    let is_deleted = article.is_deleted();
    ArticleSummary {
        id: article.id,
        title: article.title,
        text: article.text,
        author_id: article.author_id,
        author_name: author.map(AppUser::full_name),
        author_image: author.and_then(|a| a.image_url.clone()),
        tag_id: article.tag_id,
        tag_name: tag.map(|t| t.name.clone()),
        read_count: article.read_count,
        image_url: article.image_url,
        public_id: article.public_id,
        read_time: article.read_time,
        is_deleted,
        created_at: article.created_at,
        approval_status: None,
        is_recently_added: false,
        is_top_read: false,
    }
}

/// Drop repeated ids while keeping first-seen order.
pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
