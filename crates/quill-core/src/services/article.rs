use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use quill_shared::PageResponse;
use quill_shared::dto::{
    ArticleDetails, ArticleEditView, ArticleFilter, ArticleSummary, AuthorProfile, AuthorStats,
    AuthorStatsRequest, AuthorsStats, AuthoredArticleResponse, CommentDto, CreateArticleRequest,
    CreateArticleResponse, CreateAuthoredArticleRequest, CreateCommentRequest, LikeDto,
    PendingArticle, SoftDeleted, UpdateArticleRequest,
};

use super::approval::ArticleApprovalService;
use super::projection::{Lookup, distinct_ids};
use super::tag::TagService;
use super::ServiceSettings;
use crate::domain::{
    AppUser, ApprovalStatus, Article, ArticleApproval, ArticleBookmark, ArticleLike, ArticleRead,
    Comment, ReportStatus,
};
use crate::error::DomainError;
use crate::pagination::PageRequest;
use crate::ports::{ListingOrder, PublishedFilter, Repositories, Session};
use crate::reading::read_time_label;

/// Article CRUD, reads, likes, bookmarks, search and author statistics.
pub struct ArticleService {
    repos: Repositories,
    approvals: Arc<ArticleApprovalService>,
    tags: Arc<TagService>,
    settings: ServiceSettings,
}

impl ArticleService {
    pub fn new(
        repos: Repositories,
        approvals: Arc<ArticleApprovalService>,
        tags: Arc<TagService>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repos,
            approvals,
            tags,
            settings,
        }
    }

    /// Load an article, soft-deleted or not.
    pub async fn get_article_by_id(&self, id: Uuid) -> Result<Article, DomainError> {
        self.repos
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Article", id))
    }

    /// Create an article without an author. It starts out Pending.
    pub async fn create_article(
        &self,
        request: CreateArticleRequest,
    ) -> Result<CreateArticleResponse, DomainError> {
        let tag = self.tags.require(request.tag_id).await?;

        let article = Article::new(request.title, request.text, tag.id, request.image_url);
        let article = self.insert_pending(article).await?;

        Ok(CreateArticleResponse {
            title: article.title,
            tag_id: article.tag_id,
            text: article.text,
            image_url: article.image_url,
        })
    }

    /// Create an article owned by the caller, with a read-time estimate.
    pub async fn create_authored_article(
        &self,
        session: &Session,
        request: CreateAuthoredArticleRequest,
    ) -> Result<AuthoredArticleResponse, DomainError> {
        let tag = self.tags.require(request.tag_id).await?;
        let read_time = read_time_label(&request.text, self.settings.words_per_minute);

        let article = Article::new(request.title, request.text, tag.id, request.image_url)
            .with_author(session.user_id)
            .with_public_id(request.public_id)
            .with_read_time(read_time.clone());
        let article = self.insert_pending(article).await?;

        Ok(AuthoredArticleResponse {
            id: article.id,
            title: article.title,
            tag_id: article.tag_id,
            text: article.text,
            image_url: article.image_url,
            author_id: session.user_id,
            public_id: article.public_id,
            read_count: article.read_count,
            read_time: article.read_time.unwrap_or(read_time),
        })
    }

    /// Persist the article and its Pending approval together.
    async fn insert_pending(&self, article: Article) -> Result<Article, DomainError> {
        let article = self.repos.articles.add(article).await?;

        if let Err(err) = self.approvals.approve(ArticleApproval::pending(article.id)).await {
            tracing::error!(
                article_id = %article.id,
                error = %err,
                "Approval could not be recorded, removing article"
            );
            if let Err(cleanup) = self.repos.articles.delete(article.id).await {
                tracing::error!(
                    article_id = %article.id,
                    error = %cleanup,
                    "Article without approval could not be removed"
                );
            }
            return Err(err);
        }

        tracing::info!(article_id = %article.id, tag_id = %article.tag_id, "Article created");
        Ok(article)
    }

    /// Apply the fields present in `request`; absent fields stay as they are.
    pub async fn update_article(
        &self,
        id: Uuid,
        request: UpdateArticleRequest,
    ) -> Result<ArticleEditView, DomainError> {
        let mut article = self.get_article_by_id(id).await?;

        if let Some(tag_id) = request.tag_id {
            if tag_id != article.tag_id {
                self.tags.require(tag_id).await?;
            }
            article.tag_id = tag_id;
        }
        if let Some(title) = request.title {
            article.title = title;
        }
        if let Some(text) = request.text {
            if article.read_time.is_some() {
                article.read_time = Some(read_time_label(&text, self.settings.words_per_minute));
            }
            article.text = text;
        }
        if let Some(image_url) = request.image_url {
            article.image_url = Some(image_url);
        }
        article.updated_at = Utc::now();

        let article = self.repos.articles.update(article).await?;
        tracing::info!(article_id = %article.id, "Article updated");

        Ok(ArticleEditView {
            title: article.title,
            tag_id: article.tag_id,
            text: article.text,
            image_url: article.image_url,
        })
    }

    /// Record that `user_id` read the article: one new read row and the
    /// counter goes up by one. Returns the new count.
    pub async fn log_article_read(&self, article_id: Uuid, user_id: Uuid) -> Result<i64, DomainError> {
        let article = self.get_article_by_id(article_id).await?;
        self.require_user(user_id).await?;
        self.record_read(article.id, user_id).await
    }

    /// The counter is bumped in storage, never written back from a loaded copy.
    async fn record_read(&self, article_id: Uuid, user_id: Uuid) -> Result<i64, DomainError> {
        self.repos
            .reads
            .add(ArticleRead::new(user_id, article_id))
            .await?;

        let read_count = self.repos.articles.increment_read_count(article_id).await?;
        tracing::debug!(
            article_id = %article_id,
            user_id = %user_id,
            read_count,
            "Article read logged"
        );
        Ok(read_count)
    }

    /// Detail view. When a viewer is given, their like/bookmark state is
    /// filled in and the view is logged as a read.
    pub async fn get_single_article(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ArticleDetails, DomainError> {
        let article = self.get_article_by_id(id).await?;
        if article.is_deleted() {
            return Err(DomainError::not_found("Article", id));
        }

        let likes = self.repos.likes.find_by_article(id).await?;
        let comments = self.comments_for(id).await?;
        let tag = self.tags.get_by_id(article.tag_id).await?;

        let mut details = ArticleDetails {
            id: article.id,
            public_id: article.public_id.clone(),
            author_id: article.author_id,
            title: article.title.clone(),
            tag_id: article.tag_id,
            tag_name: tag.map(|t| t.name),
            text: article.text.clone(),
            image_url: article.image_url.clone(),
            read_count: article.read_count,
            read_time: article.read_time.clone(),
            created_at: article.created_at,
            comments,
            like_count: likes.len() as u64,
            liked: false,
            bookmarked: false,
        };

        if let Some(viewer) = viewer {
            let user = self.require_user(viewer).await?;
            details.liked = likes.iter().any(|like| like.user_id == user.id);
            details.bookmarked = self.repos.bookmarks.exists(user.id, id).await?;
            details.read_count = self.record_read(article.id, user.id).await?;
        }

        Ok(details)
    }

    async fn comments_for(&self, article_id: Uuid) -> Result<Vec<CommentDto>, DomainError> {
        let mut comments = self.repos.comments.find_by_article(article_id).await?;
        comments.sort_by_key(|c| c.created_at);

        let mut lookup = Lookup::new(&self.repos);
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(lookup.comment(comment).await?);
        }
        Ok(views)
    }

    /// Published, non-deleted articles matching `filter`, one page at a time.
    pub async fn get_all_articles(
        &self,
        filter: ArticleFilter,
    ) -> Result<PageResponse<ArticleSummary>, DomainError> {
        let recently_added = filter.recently_added.unwrap_or(false);
        let top_read = filter.top_read.unwrap_or(false);
        let query = PublishedFilter {
            author_id: filter.author_id,
            tag_id: filter.tag_id,
            order: if recently_added {
                ListingOrder::RecentlyAdded
            } else if top_read {
                ListingOrder::TopRead
            } else {
                ListingOrder::Created
            },
        };

        let request = PageRequest::resolve(filter.page, filter.size, self.settings.default_page_size);
        let page = self.repos.articles.find_published(&query, request).await?;

        let mut lookup = Lookup::new(&self.repos);
        let mut items = lookup.summarize_all(page.items).await?;
        for item in &mut items {
            item.is_recently_added = recently_added;
            item.is_top_read = top_read;
        }

        Ok(request.respond(items, page.total_count))
    }

    /// Articles bookmarked by a user, in bookmark order.
    pub async fn get_bookmarked_articles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ArticleSummary>, DomainError> {
        let bookmarks = self.repos.bookmarks.find_by_user(user_id).await?;
        let ids = distinct_ids(bookmarks.into_iter().map(|b| b.article_id));
        let articles = self.live_articles(ids).await?;

        let mut lookup = Lookup::new(&self.repos);
        Ok(lookup.summarize_all(articles).await?)
    }

    /// Published articles of one author, newest first.
    pub async fn get_author_articles(
        &self,
        author_id: Uuid,
    ) -> Result<Vec<ArticleSummary>, DomainError> {
        let mut lookup = Lookup::new(&self.repos);
        let mut rows = Vec::new();

        for article in self.repos.articles.find_by_author(author_id).await? {
            if article.is_deleted() {
                continue;
            }
            let Some(approval) = self.approvals.find_for_article(article.id).await? else {
                continue;
            };
            if approval.status != ApprovalStatus::Published {
                continue;
            }
            let mut row = lookup.summarize(article).await?;
            row.approval_status = Some(approval.status.to_string());
            rows.push(row);
        }

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    /// Case-sensitive substring search over author name, title and tag name.
    pub async fn search_articles(&self, term: &str) -> Result<Vec<ArticleSummary>, DomainError> {
        let mut lookup = Lookup::new(&self.repos);
        let mut rows = Vec::new();

        for article in self.repos.articles.find_all().await? {
            if article.is_deleted() {
                continue;
            }
            let author = match article.author_id {
                Some(author_id) => lookup.user(author_id).await?,
                None => None,
            };
            let tag = lookup.tag(article.tag_id).await?;

            let hit = article.title.contains(term)
                || tag.as_ref().is_some_and(|t| t.name.contains(term))
                || author.as_ref().is_some_and(|a| {
                    a.full_name().contains(term)
                        || a.first_name.contains(term)
                        || a.last_name.contains(term)
                });

            if hit {
                rows.push(lookup.summarize(article).await?);
            }
        }

        tracing::debug!(term, hits = rows.len(), "Article search");
        Ok(rows)
    }

    /// Validate a report decision. The decision is not stored yet: the
    /// article is written back unchanged.
    pub async fn set_article_report_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<bool, DomainError> {
        let status: ReportStatus = status.parse()?;
        let article = self.get_article_by_id(id).await?;

        self.repos.articles.update(article).await?;
        tracing::info!(article_id = %id, ?status, "Report status reviewed");

        Ok(true)
    }

    /// Hide an article from listings while keeping the row.
    pub async fn soft_delete_article(&self, id: Uuid) -> Result<SoftDeleted, DomainError> {
        let mut article = self.get_article_by_id(id).await?;
        let deleted_at = article.soft_delete();

        self.repos.articles.update(article).await?;
        tracing::info!(article_id = %id, "Article soft-deleted");

        Ok(SoftDeleted { deleted_at })
    }

    /// Remove an article and everything hanging off it.
    ///
    /// The approval goes only after the article row, so a failure part way
    /// never leaves an article without one.
    pub async fn delete_article(&self, id: Uuid) -> Result<bool, DomainError> {
        let article = self.get_article_by_id(id).await?;

        let likes = self.repos.likes.delete_by_article(article.id).await?;
        let bookmarks = self.repos.bookmarks.delete_by_article(article.id).await?;
        let reads = self.repos.reads.delete_by_article(article.id).await?;
        let comments = self.repos.comments.delete_by_article(article.id).await?;
        self.repos.articles.delete(article.id).await?;

        // Already gone when storage cascades the article delete.
        if let Some(approval) = self.approvals.find_for_article(article.id).await? {
            self.approvals.remove(&approval).await?;
        }

        tracing::info!(
            article_id = %id,
            likes,
            bookmarks,
            reads,
            comments,
            "Article deleted"
        );
        Ok(true)
    }

    /// Article counts for each requested author, in request order.
    pub async fn get_author_stats(
        &self,
        request: AuthorStatsRequest,
    ) -> Result<AuthorsStats, DomainError> {
        let mut author_stats = Vec::with_capacity(request.author_ids.len());
        for author_id in request.author_ids {
            let total_articles = self.repos.articles.count_by_author(author_id).await?;
            author_stats.push(AuthorStats {
                author_id,
                total_articles,
            });
        }
        Ok(AuthorsStats { author_stats })
    }

    /// Everyone who has written an article, with their article counts.
    pub async fn list_authors(&self) -> Result<Vec<AuthorProfile>, DomainError> {
        let articles = self.repos.articles.find_all().await?;
        let author_ids = distinct_ids(articles.iter().filter_map(|a| a.author_id));

        let mut authors = Vec::with_capacity(author_ids.len());
        for author_id in author_ids {
            let Some(user) = self.repos.users.find_by_id(author_id).await? else {
                continue;
            };
            if user.is_deleted() {
                continue;
            }
            let article_count = self.repos.articles.count_by_author(author_id).await?;
            authors.push(AuthorProfile {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                squad: user.squad,
                stack: user.stack,
                phone_number: user.phone_number,
                image_url: user.image_url,
                article_count,
            });
        }
        Ok(authors)
    }

    /// Articles waiting for an editor.
    pub async fn get_pending_articles(&self) -> Result<Vec<PendingArticle>, DomainError> {
        let mut pending = Vec::new();

        for approval in self.approvals.with_status(ApprovalStatus::Pending).await? {
            let Some(article) = self.repos.articles.find_by_id(approval.article_id).await? else {
                tracing::warn!(
                    approval_id = %approval.id,
                    article_id = %approval.article_id,
                    "Pending approval points at a missing article"
                );
                continue;
            };
            if article.is_deleted() {
                continue;
            }
            pending.push(PendingArticle {
                approval_id: approval.id,
                article_id: article.id,
                title: article.title,
                text: article.text,
                tag_id: article.tag_id,
                image_url: article.image_url,
            });
        }

        Ok(pending)
    }

    /// Like an article. Returns `false` when the user already liked it.
    pub async fn like_article(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, DomainError> {
        self.require_live_article(article_id).await?;
        self.require_user(user_id).await?;

        if self.repos.likes.exists(user_id, article_id).await? {
            return Ok(false);
        }
        self.repos
            .likes
            .add(ArticleLike::new(user_id, article_id))
            .await?;
        tracing::debug!(article_id = %article_id, user_id = %user_id, "Article liked");
        Ok(true)
    }

    /// Returns `false` when there was no like to remove.
    pub async fn unlike_article(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, DomainError> {
        let likes = self.repos.likes.find_by_user(user_id).await?;
        let mut removed = false;
        for like in likes.into_iter().filter(|l| l.matches(user_id, article_id)) {
            self.repos.likes.delete(like.id).await?;
            removed = true;
        }
        Ok(removed)
    }

    /// Bookmark an article. Returns `false` when it was already bookmarked.
    pub async fn bookmark_article(
        &self,
        user_id: Uuid,
        article_id: Uuid,
    ) -> Result<bool, DomainError> {
        self.require_live_article(article_id).await?;
        self.require_user(user_id).await?;

        if self.repos.bookmarks.exists(user_id, article_id).await? {
            return Ok(false);
        }
        self.repos
            .bookmarks
            .add(ArticleBookmark::new(user_id, article_id))
            .await?;
        tracing::debug!(article_id = %article_id, user_id = %user_id, "Article bookmarked");
        Ok(true)
    }

    /// Returns `false` when there was no bookmark to remove.
    pub async fn remove_bookmark(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, DomainError> {
        let bookmarks = self.repos.bookmarks.find_by_user(user_id).await?;
        let mut removed = false;
        for bookmark in bookmarks.into_iter().filter(|b| b.matches(user_id, article_id)) {
            self.repos.bookmarks.delete(bookmark.id).await?;
            removed = true;
        }
        Ok(removed)
    }

    pub async fn get_likes_by_article(&self, article_id: Uuid) -> Result<Vec<LikeDto>, DomainError> {
        let likes = self.repos.likes.find_by_article(article_id).await?;
        Ok(likes
            .into_iter()
            .map(|like| LikeDto {
                user_id: like.user_id,
                article_id: like.article_id,
            })
            .collect())
    }

    pub async fn is_article_bookmarked_by_user(
        &self,
        article_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, DomainError> {
        Ok(self.repos.bookmarks.exists(user_id, article_id).await?)
    }

    pub async fn add_comment(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<CommentDto, DomainError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Comment text must not be empty".to_string(),
            ));
        }
        self.require_live_article(article_id).await?;
        let user = self.require_user(user_id).await?;

        let comment = self
            .repos
            .comments
            .add(Comment::new(article_id, user.id, text.to_string()))
            .await?;
        tracing::debug!(article_id = %article_id, comment_id = %comment.id, "Comment added");

        Ok(CommentDto {
            id: comment.id,
            name: user.full_name(),
            image: user.image_url,
            text: comment.text,
            created_at: comment.created_at,
        })
    }

    async fn require_live_article(&self, id: Uuid) -> Result<Article, DomainError> {
        let article = self.get_article_by_id(id).await?;
        if article.is_deleted() {
            return Err(DomainError::not_found("Article", id));
        }
        Ok(article)
    }

    async fn require_user(&self, id: Uuid) -> Result<AppUser, DomainError> {
        self.repos
            .users
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or_else(|| DomainError::not_found("AppUser", id))
    }

    /// Load the given ids, skipping missing and soft-deleted articles.
    async fn live_articles(&self, ids: Vec<Uuid>) -> Result<Vec<Article>, DomainError> {
        let mut articles = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(article) = self.repos.articles.find_by_id(id).await? {
                if !article.is_deleted() {
                    articles.push(article);
                }
            }
        }
        Ok(articles)
    }
}
