mod common;

use uuid::Uuid;

use common::Harness;
use quill_core::DomainError;
use quill_core::ports::BaseRepository;
use quill_shared::dto::UpdateUserRequest;

#[tokio::test]
async fn soft_deleted_users_are_hidden_but_kept() {
    let h = Harness::new();
    let ada = h.user("Ada", "Lovelace").await;
    h.user("Grace", "Hopper").await;
    let users = &h.services.users;

    let stamp = users.soft_delete_user(ada.id).await.unwrap().unwrap();

    assert!(users.get_user_by_id(ada.id).await.unwrap().is_none());
    assert_eq!(users.get_all_users().await.unwrap().len(), 1);
    let row = h.repos.users.find_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(row.deleted_at, Some(stamp.deleted_at));

    assert!(users.soft_delete_user(ada.id).await.unwrap().is_none());
    assert!(users.soft_delete_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_the_whole_profile() {
    let h = Harness::new();
    let mut ada = h.user("Ada", "Lovelace").await;
    ada.squad = Some("SQ-1".into());
    h.repos.users.update(ada.clone()).await.unwrap();

    let request = UpdateUserRequest {
        first_name: "Augusta".into(),
        last_name: "King".into(),
        email: "augusta@example.com".into(),
        phone_number: Some("555-0100".into()),
        image_url: None,
        squad: None,
        stack: Some("Rust".into()),
    };
    let echoed = h
        .services
        .users
        .update_user(ada.id, request.clone())
        .await
        .unwrap();
    assert_eq!(echoed, request);

    let profile = h.services.users.get_user_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(profile.first_name, "Augusta");
    assert!(profile.squad.is_none());

    let missing = h
        .services
        .users
        .update_user(Uuid::new_v4(), request)
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn read_history_is_distinct_and_skips_deleted_articles() {
    let h = Harness::new();
    let author = h.user("Ada", "Lovelace").await;
    let reader = h.user("Grace", "Hopper").await;
    let tag = h.tag("Rust").await;
    let first = h.published(&author, tag, "First").await;
    let second = h.published(&author, tag, "Second").await;
    let articles = &h.services.articles;

    articles.log_article_read(first, reader.id).await.unwrap();
    articles.log_article_read(first, reader.id).await.unwrap();
    articles.log_article_read(second, reader.id).await.unwrap();

    let history = h
        .services
        .users
        .get_article_read_by_user(reader.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);

    articles.soft_delete_article(second).await.unwrap();
    let history = h
        .services
        .users
        .get_article_read_by_user(reader.id)
        .await
        .unwrap();
    let ids: Vec<Uuid> = history.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![first]);
}

#[tokio::test]
async fn roles_are_validated_and_accumulate() {
    let h = Harness::new();
    let ada = h.user("Ada", "Lovelace").await;
    let users = &h.services.users;

    assert_eq!(users.assign_role(ada.id, "editor").await.unwrap(), vec!["Editor"]);
    let roles = users.assign_role(ada.id, "Admin").await.unwrap();
    assert!(roles.contains(&"Editor".to_string()));
    assert!(roles.contains(&"Admin".to_string()));

    let profile = users.get_user_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(profile.roles.len(), 2);

    assert!(matches!(
        users.assign_role(ada.id, "superuser").await,
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        users.assign_role(Uuid::new_v4(), "Editor").await,
        Err(DomainError::NotFound { .. })
    ));
}
