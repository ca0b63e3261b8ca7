use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{ApprovalStatus, ArticleApproval};
use crate::error::DomainError;
use crate::ports::ApprovalRepository;

/// Records and transitions an article's publication status.
///
/// There is no transition guard: any status may follow any other.
pub struct ArticleApprovalService {
    approvals: Arc<dyn ApprovalRepository>,
}

impl ArticleApprovalService {
    pub fn new(approvals: Arc<dyn ApprovalRepository>) -> Self {
        Self { approvals }
    }

    /// Store `approval`, or overwrite the status of the approval already
    /// attached to the same article.
    pub async fn approve(&self, approval: ArticleApproval) -> Result<ArticleApproval, DomainError> {
        match self.approvals.find_by_article(approval.article_id).await? {
            Some(mut existing) => {
                let previous = existing.status;
                existing.status = approval.status;
                existing.updated_at = Utc::now();
                let saved = self.approvals.update(existing).await?;
                tracing::info!(
                    article_id = %saved.article_id,
                    from = %previous,
                    to = %saved.status,
                    "Approval status changed"
                );
                Ok(saved)
            }
            None => {
                let saved = self.approvals.add(approval).await?;
                tracing::info!(
                    article_id = %saved.article_id,
                    status = %saved.status,
                    "Approval recorded"
                );
                Ok(saved)
            }
        }
    }

    /// Transition the approval of an existing article.
    pub async fn set_status(
        &self,
        article_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<ArticleApproval, DomainError> {
        self.require(article_id).await?;
        self.approve(ArticleApproval::new(article_id, status)).await
    }

    pub async fn status_of(&self, article_id: Uuid) -> Result<ApprovalStatus, DomainError> {
        Ok(self.require(article_id).await?.status)
    }

    pub(crate) async fn find_for_article(
        &self,
        article_id: Uuid,
    ) -> Result<Option<ArticleApproval>, DomainError> {
        Ok(self.approvals.find_by_article(article_id).await?)
    }

    pub(crate) async fn with_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<ArticleApproval>, DomainError> {
        Ok(self.approvals.find_by_status(status).await?)
    }

    pub(crate) async fn remove(&self, approval: &ArticleApproval) -> Result<(), DomainError> {
        Ok(self.approvals.delete(approval.id).await?)
    }

    async fn require(&self, article_id: Uuid) -> Result<ArticleApproval, DomainError> {
        self.approvals
            .find_by_article(article_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ArticleApproval", article_id))
    }
}
