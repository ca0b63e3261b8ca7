use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{ApprovalStatus, Article, ArticleApproval, Like};
use quill_core::error::RepoError;
use quill_core::pagination::PageRequest;
use quill_core::ports::{
    ApprovalRepository, ArticleRepository, BaseRepository, EngagementRepository, PublishedFilter,
};

use super::entity::{article, article_approval};
use super::postgres_repo::{
    PostgresApprovalRepository, PostgresArticleRepository, PostgresLikeRepository,
};

fn article_model(id: Uuid, tag_id: Uuid) -> article::Model {
    let now = chrono::Utc::now();
    article::Model {
        id,
        title: "Test Article".to_owned(),
        text: "Content".to_owned(),
        author_id: None,
        tag_id,
        image_url: None,
        read_count: 3,
        read_time: Some("1 mins".to_owned()),
        public_id: None,
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

#[tokio::test]
async fn test_find_article_by_id() {
    let article_id = Uuid::new_v4();
    let tag_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![article_model(article_id, tag_id)]])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    let result = BaseRepository::<Article, Uuid>::find_by_id(&repo, article_id)
        .await
        .unwrap();

    let article = result.expect("article should be found");
    assert_eq!(article.title, "Test Article");
    assert_eq!(article.id, article_id);
    assert_eq!(article.read_count, 3);
    assert!(!article.is_deleted());
}

#[tokio::test]
async fn test_approval_status_codes_are_decoded() {
    let now = chrono::Utc::now();
    let rows = vec![
        article_approval::Model {
            id: Uuid::new_v4(),
            article_id: Uuid::new_v4(),
            status: 2,
            created_at: now.into(),
            updated_at: now.into(),
        },
        article_approval::Model {
            id: Uuid::new_v4(),
            article_id: Uuid::new_v4(),
            status: 9,
            created_at: now.into(),
            updated_at: now.into(),
        },
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![rows])
        .into_connection();

    let repo = PostgresApprovalRepository::new(db);
    let approvals = BaseRepository::<ArticleApproval, Uuid>::find_all(&repo)
        .await
        .unwrap();

    let statuses: Vec<ApprovalStatus> = approvals.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![ApprovalStatus::Published, ApprovalStatus::Declined]
    );
}

#[tokio::test]
async fn test_find_pending_approvals() {
    let article_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![article_approval::Model {
            id: Uuid::new_v4(),
            article_id,
            status: 1,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresApprovalRepository::new(db);
    let pending = repo.find_by_status(ApprovalStatus::Pending).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].article_id, article_id);
    assert_eq!(pending[0].status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_like_exists_uses_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(1)),
        )])]])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);
    let liked = EngagementRepository::<Like>::exists(&repo, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();

    assert!(liked);
}

#[tokio::test]
async fn test_delete_missing_article_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);
    let err = BaseRepository::<Article, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_increment_read_count_returns_stored_value() {
    let article_id = Uuid::new_v4();
    let mut bumped = article_model(article_id, Uuid::new_v4());
    bumped.read_count = 4;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![bumped], vec![]])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    assert_eq!(repo.increment_read_count(article_id).await.unwrap(), 4);
    assert!(matches!(
        repo.increment_read_count(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_published_page_uses_count_and_offset() {
    let tag_id = Uuid::new_v4();
    let rows = vec![
        article_model(Uuid::new_v4(), tag_id),
        article_model(Uuid::new_v4(), tag_id),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(12)),
        )])]])
        .append_query_results(vec![rows])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);
    let filter = PublishedFilter {
        tag_id: Some(tag_id),
        ..Default::default()
    };
    let page = repo
        .find_published(&filter, PageRequest { page: 2, size: 10 })
        .await
        .unwrap();

    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 2);
}
