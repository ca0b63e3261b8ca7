#![allow(dead_code)]

pub mod doubles;

use chrono::Duration;
use uuid::Uuid;

use quill_core::domain::{AppUser, ApprovalStatus};
use quill_core::ports::{BaseRepository, Repositories, Session};
use quill_core::services::ServiceSettings;
use quill_core::Services;
use quill_infra::in_memory_repositories;
use quill_shared::dto::{CreateAuthoredArticleRequest, CreateTagRequest};

/// Services plus direct access to the storage behind them.
pub struct Harness {
    pub repos: Repositories,
    pub services: Services,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_repos(in_memory_repositories())
    }

    pub fn with_repos(repos: Repositories) -> Self {
        let services = Services::new(repos.clone(), ServiceSettings::default());
        Self { repos, services }
    }

    /// Move an article's creation time `minutes` into the past.
    pub async fn backdate(&self, id: Uuid, minutes: i64) {
        let mut article = self.repos.articles.find_by_id(id).await.unwrap().unwrap();
        article.created_at -= Duration::minutes(minutes);
        self.repos.articles.update(article).await.unwrap();
    }

    pub async fn user(&self, first: &str, last: &str) -> AppUser {
        let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
        self.repos
            .users
            .add(AppUser::new(first.into(), last.into(), email))
            .await
            .unwrap()
    }

    pub async fn tag(&self, name: &str) -> Uuid {
        self.services
            .tags
            .create_tag(CreateTagRequest { name: name.into() })
            .await
            .unwrap()
            .id
    }

    /// Create a Pending article written by `author`.
    pub async fn draft(&self, author: &AppUser, tag_id: Uuid, title: &str, text: &str) -> Uuid {
        self.services
            .articles
            .create_authored_article(
                &Session::new(author.id),
                CreateAuthoredArticleRequest {
                    title: title.into(),
                    tag_id,
                    text: text.into(),
                    image_url: None,
                    public_id: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    /// Create an article and publish it straight away.
    pub async fn published(&self, author: &AppUser, tag_id: Uuid, title: &str) -> Uuid {
        let id = self.draft(author, tag_id, title, "some body text").await;
        self.services
            .approvals
            .set_status(id, ApprovalStatus::Published)
            .await
            .unwrap();
        id
    }
}
