use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;
use quill_core::domain::Post;
use quill_core::ports::BaseRepository;
use sea_orm::{DatabaseBackend, MockDatabase};

#[tokio::test]
async fn test_find_post_by_id() {
    // Create mock database with expected query results
    let post_id = uuid::Uuid::new_v4();
    let author_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            title: "Test Post".to_owned(),
            subtitle: "Subtitle".to_owned(),
            body: "Body".to_owned(),
            img_url: "https://example.com/cat.png".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.id, post_id);
    assert_eq!(found.author_id, author_id);
}
