use std::sync::Arc;

use async_trait::async_trait;

use crate::pb::{Post, PostPatch, ScopedClient};
use crate::repositories::PostRepository;

use super::error::ServiceError;

#[async_trait]
pub trait PostService: Send + Sync {
    /// All visible posts; a non-empty `query` keeps only posts whose title
    /// or content contains it, ignoring case, in backend order.
    async fn list(&self, client: &ScopedClient, query: &str) -> Result<Vec<Post>, ServiceError>;

    async fn get(&self, client: &ScopedClient, id: &str) -> Result<Post, ServiceError>;

    async fn create(
        &self,
        client: &ScopedClient,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ServiceError>;

    async fn update(
        &self,
        client: &ScopedClient,
        id: &str,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ServiceError>;

    async fn delete(&self, client: &ScopedClient, id: &str) -> Result<(), ServiceError>;

    async fn toggle_public(&self, client: &ScopedClient, id: &str) -> Result<(), ServiceError>;
}

pub struct RepoPostService {
    repo: Arc<dyn PostRepository>,
}

impl RepoPostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PostService for RepoPostService {
    async fn list(&self, client: &ScopedClient, query: &str) -> Result<Vec<Post>, ServiceError> {
        let posts = self.repo.list(client).await?;
        if query.is_empty() {
            return Ok(posts);
        }

        // Filtered here rather than by the backend.
        let needle = query.to_lowercase();
        Ok(posts.into_iter().filter(|p| p.matches(&needle)).collect())
    }

    async fn get(&self, client: &ScopedClient, id: &str) -> Result<Post, ServiceError> {
        Ok(self.repo.get(client, id).await?)
    }

    async fn create(
        &self,
        client: &ScopedClient,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ServiceError> {
        if title.trim().is_empty() {
            return Err(ServiceError::validation("title is required"));
        }
        Ok(self.repo.create(client, title, content, public).await?)
    }

    async fn update(
        &self,
        client: &ScopedClient,
        id: &str,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ServiceError> {
        let patch = PostPatch {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            public: Some(public),
        };
        Ok(self.repo.update(client, id, &patch).await?)
    }

    async fn delete(&self, client: &ScopedClient, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete(client, id).await?)
    }

    async fn toggle_public(&self, client: &ScopedClient, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.toggle_public(client, id).await?)
    }
}
