//! Application services - the article lifecycle and user management
//! workflows built on top of the ports.

mod approval;
mod article;
mod projection;
mod tag;
mod user_management;

use std::sync::Arc;

pub use approval::ArticleApprovalService;
pub use article::ArticleService;
pub use tag::TagService;
pub use user_management::UserManagementService;

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::ports::Repositories;
use crate::reading::DEFAULT_WORDS_PER_MINUTE;

/// Tunables shared by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Reading speed used for the read-time estimate.
    pub words_per_minute: u32,
    /// Page size used when a listing request does not name one.
    pub default_page_size: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// All services, wired against one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub tags: Arc<TagService>,
    pub approvals: Arc<ArticleApprovalService>,
    pub articles: Arc<ArticleService>,
    pub users: Arc<UserManagementService>,
}

impl Services {
    pub fn new(repos: Repositories, settings: ServiceSettings) -> Self {
        let tags = Arc::new(TagService::new(repos.tags.clone()));
        let approvals = Arc::new(ArticleApprovalService::new(repos.approvals.clone()));
        let articles = Arc::new(ArticleService::new(
            repos.clone(),
            approvals.clone(),
            tags.clone(),
            settings,
        ));
        let users = Arc::new(UserManagementService::new(repos));

        Self {
            tags,
            approvals,
            articles,
            users,
        }
    }
}
