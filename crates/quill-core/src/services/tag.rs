use std::sync::Arc;

use uuid::Uuid;

use quill_shared::dto::{CreateTagRequest, TagDto};

use crate::domain::ArticleTag;
use crate::error::DomainError;
use crate::ports::TagRepository;

/// Lookup and maintenance of article categories.
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ArticleTag>, DomainError> {
        Ok(self.tags.find_by_id(id).await?)
    }

    /// Like [`get_by_id`](Self::get_by_id) but absence is an error.
    pub async fn require(&self, id: Uuid) -> Result<ArticleTag, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ArticleTag", id))
    }

    /// All tags ordered by name.
    pub async fn list_tags(&self) -> Result<Vec<TagDto>, DomainError> {
        let mut tags = self.tags.find_all().await?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags.into_iter().map(to_dto).collect())
    }

    pub async fn create_tag(&self, request: CreateTagRequest) -> Result<TagDto, DomainError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Tag name must not be empty".to_string(),
            ));
        }

        if self.tags.find_by_name(name).await?.is_some() {
            return Err(DomainError::Duplicate(format!("Tag '{name}' already exists")));
        }

        let tag = self.tags.add(ArticleTag::new(name.to_string())).await?;
        tracing::info!(tag_id = %tag.id, tag_name = %tag.name, "Tag created");

        Ok(to_dto(tag))
    }
}

fn to_dto(tag: ArticleTag) -> TagDto {
    TagDto {
        id: tag.id,
        name: tag.name,
    }
}
