//! Data Transfer Objects - request/response types for the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// Request to create an article without an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub tag_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
}

/// Echo of the created article's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateArticleResponse {
    pub title: String,
    pub tag_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
}

/// Request to create an article on behalf of the signed-in author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthoredArticleRequest {
    pub title: String,
    pub tag_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
    /// Identifier handed out by the client (e.g. an image host's public id).
    pub public_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub tag_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub public_id: Option<String>,
    pub read_count: i64,
    pub read_time: String,
}

/// Partial article update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub tag_id: Option<Uuid>,
    pub text: Option<String>,
    pub image_url: Option<String>,
}

/// The editable fields of an article after a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleEditView {
    pub title: String,
    pub tag_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
}

/// Listing filters. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleFilter {
    pub author_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    /// Newest first. Wins over `top_read` when both are set.
    pub recently_added: Option<bool>,
    /// Most read first.
    pub top_read: Option<bool>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Denormalized article row used by every listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
    pub author_image: Option<String>,
    pub tag_id: Uuid,
    pub tag_name: Option<String>,
    pub read_count: i64,
    pub image_url: Option<String>,
    pub public_id: Option<String>,
    pub read_time: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<String>,
    pub is_recently_added: bool,
    pub is_top_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: Uuid,
    /// Display name of the commenter.
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Detail view of a single article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetails {
    pub id: Uuid,
    pub public_id: Option<String>,
    pub author_id: Option<Uuid>,
    pub title: String,
    pub tag_id: Uuid,
    pub tag_name: Option<String>,
    pub text: String,
    pub image_url: Option<String>,
    pub read_count: i64,
    pub read_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentDto>,
    pub like_count: u64,
    pub liked: bool,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeDto {
    pub user_id: Uuid,
    pub article_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingArticle {
    pub approval_id: Uuid,
    pub article_id: Uuid,
    pub title: String,
    pub text: String,
    pub tag_id: Uuid,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorStatsRequest {
    pub author_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub author_id: Uuid,
    pub total_articles: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsStats {
    pub author_stats: Vec<AuthorStats>,
}

/// Public profile of someone who has written at least one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub squad: Option<String>,
    pub stack: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub article_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftDeleted {
    pub deleted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    pub id: Uuid,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Response containing a user's profile and role names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUserDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub squad: Option<String>,
    pub stack: Option<String>,
    pub roles: Vec<String>,
}

/// Full profile overwrite. Every field is written, `None` clears the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub squad: Option<String>,
    pub stack: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}
