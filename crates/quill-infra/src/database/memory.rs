//! In-memory repository implementations - used when no database is
//! configured, and as the backend for integration tests.
//!
//! Note: Data is lost on process restart. The unique-email and unique-title
//! constraints are enforced here so callers see the same error paths as with
//! PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, UserRepository,
};

/// In-memory user repository using a HashMap with async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|existing| existing.email == user.email && existing.id != user.id);
        if taken {
            return Err(RepoError::Constraint("duplicate email".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|user| user.email == email).cloned())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|existing| existing.title == post.title && existing.id != post.id);
        if taken {
            return Err(RepoError::Constraint("duplicate title".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|post| post.title == title).cloned())
    }
}

/// In-memory comment repository.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    store: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.store.write().await.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let store = self.store.read().await;
        let mut comments: Vec<Comment> = store
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn delete_by_post_id(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, comment| comment.post_id != post_id);
        Ok((before - store.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::Role;

    fn user(email: &str) -> User {
        User::new(
            email.to_string(),
            "$argon2$fake".to_string(),
            "Test".to_string(),
            Role::Member,
        )
    }

    #[tokio::test]
    async fn test_save_and_find_user() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("ana@example.com")).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.email, "ana@example.com");

        let by_email = repo.find_by_email("ana@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, saved.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("ana@example.com")).await.unwrap();

        let result = repo.save(user("ana@example.com")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(user("ana@example.com")).await.unwrap();

        saved.name = "Renamed".to_string();
        repo.save(saved.clone()).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let post = |title: &str| {
            Post::new(
                author,
                title.to_string(),
                "sub".to_string(),
                "body".to_string(),
                "https://example.com/a.png".to_string(),
            )
        };

        repo.save(post("First")).await.unwrap();
        let result = repo.save(post("First")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_comments_filtered_and_cascaded_by_post() {
        let repo = InMemoryCommentRepository::new();
        let author = Uuid::new_v4();
        let post_a = Uuid::new_v4();
        let post_b = Uuid::new_v4();

        repo.save(Comment::new(author, post_a, "on a".to_string()))
            .await
            .unwrap();
        repo.save(Comment::new(author, post_a, "also on a".to_string()))
            .await
            .unwrap();
        repo.save(Comment::new(author, post_b, "on b".to_string()))
            .await
            .unwrap();

        assert_eq!(repo.find_by_post_id(post_a).await.unwrap().len(), 2);

        let removed = repo.delete_by_post_id(post_a).await.unwrap();
        assert_eq!(removed, 2);
        assert!(repo.find_by_post_id(post_a).await.unwrap().is_empty());
        assert_eq!(repo.find_by_post_id(post_b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let result = repo.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
