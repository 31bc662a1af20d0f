use uuid::Uuid;

use newswire::domain::models::{News, Upload, User};
use newswire::domain::ports::errors::DatabaseError;
use newswire::infrastructure::database::{
    DatabaseConnection, NewsRepositoryImpl, UploadRepositoryImpl, UserRepositoryImpl,
};
use newswire::{NewsRepository, UploadRepository, UserRepository};

async fn test_db(dir: &tempfile::TempDir) -> DatabaseConnection {
    let path = dir.path().join("test.db");
    let url = format!("sqlite:{}", path.display());
    let db = DatabaseConnection::new(&url, 5)
        .await
        .expect("failed to create database connection");
    db.migrate().await.expect("failed to run migrations");
    db
}

#[tokio::test]
async fn test_user_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = UserRepositoryImpl::new(db.pool().clone());

    let user = User::new("Ada", 30, "London", "ada@example.com", "phc-hash");
    repo.create(&user).await.expect("create should succeed");

    let by_id = repo
        .find_by_id(user.id)
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_id, user);

    let by_email = repo
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_email.id, user.id);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());

    db.close().await;
}

#[tokio::test]
async fn test_duplicate_email_maps_to_constraint_violation() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = UserRepositoryImpl::new(db.pool().clone());

    let first = User::new("Ada", 30, "London", "ada@example.com", "hash-a");
    let second = User::new("Grace", 40, "Arlington", "ada@example.com", "hash-b");

    repo.create(&first).await.unwrap();
    let err = repo.create(&second).await.unwrap_err();
    assert!(matches!(err, DatabaseError::ConstraintViolation(_)));

    db.close().await;
}

#[tokio::test]
async fn test_update_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = UserRepositoryImpl::new(db.pool().clone());

    let user = User::new("Ada", 30, "London", "ada@example.com", "hash");
    repo.create(&user).await.unwrap();

    repo.update_token(user.id, "access-token").await.unwrap();
    repo.update_refresh_token(user.id, "refresh-token")
        .await
        .unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.token.as_deref(), Some("access-token"));
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-token"));
    assert!(stored.updated_at >= user.updated_at);

    let missing = Uuid::new_v4();
    let err = repo.update_token(missing, "t").await.unwrap_err();
    assert!(matches!(err, DatabaseError::UserNotFound(id) if id == missing));

    db.close().await;
}

#[tokio::test]
async fn test_users_listed_in_creation_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = UserRepositoryImpl::new(db.pool().clone());

    for i in 0..3i64 {
        let user = User::new(
            format!("user-{i}"),
            20 + i,
            "City",
            format!("user-{i}@example.com"),
            "hash",
        );
        repo.create(&user).await.unwrap();
        // Distinct created_at values keep the ordering assertion meaningful.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 3);
    let names: Vec<&str> = all.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["user-0", "user-1", "user-2"]);

    db.close().await;
}

#[tokio::test]
async fn test_news_crud() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = NewsRepositoryImpl::new(db.pool().clone());

    let mut news = News::new("Title", "Desc", "Body", "Author", "tech");
    repo.create(&news).await.unwrap();

    let stored = repo.find_by_id(news.id).await.unwrap().unwrap();
    assert_eq!(stored, news);

    news.title = "Updated title".to_string();
    repo.update(&news).await.unwrap();

    let updated = repo.find_by_id(news.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.updated_at >= news.created_at);

    repo.delete(news.id).await.unwrap();
    assert!(repo.find_by_id(news.id).await.unwrap().is_none());
    assert!(repo.find_all().await.unwrap().is_empty());

    db.close().await;
}

#[tokio::test]
async fn test_update_missing_news_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = NewsRepositoryImpl::new(db.pool().clone());

    let news = News::new("Title", "Desc", "Body", "Author", "tech");
    let err = repo.update(&news).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NewsNotFound(id) if id == news.id));

    db.close().await;
}

#[tokio::test]
async fn test_upload_crud() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let repo = UploadRepositoryImpl::new(db.pool().clone());

    let mut upload = Upload::new("Cover", "Front page cover", "image", "/uploads/cover.png");
    repo.create(&upload).await.unwrap();

    let stored = repo.find_by_id(upload.id).await.unwrap().unwrap();
    assert_eq!(stored, upload);

    upload.path = "/uploads/cover-v2.png".to_string();
    repo.update(&upload).await.unwrap();

    let updated = repo.find_by_id(upload.id).await.unwrap().unwrap();
    assert_eq!(updated.path, "/uploads/cover-v2.png");
    assert_eq!(updated.kind, "image");

    repo.delete(upload.id).await.unwrap();
    assert!(repo.find_by_id(upload.id).await.unwrap().is_none());

    db.close().await;
}

#[tokio::test]
async fn test_delete_missing_rows_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;

    let news = NewsRepositoryImpl::new(db.pool().clone());
    let uploads = UploadRepositoryImpl::new(db.pool().clone());

    news.delete(Uuid::new_v4()).await.unwrap();
    uploads.delete(Uuid::new_v4()).await.unwrap();

    db.close().await;
}
