use async_trait::async_trait;

use crate::pb::{ClientError, Post, PostPatch, ScopedClient};

/// Post data access.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self, client: &ScopedClient) -> Result<Vec<Post>, ClientError>;

    async fn get(&self, client: &ScopedClient, id: &str) -> Result<Post, ClientError>;

    async fn create(
        &self,
        client: &ScopedClient,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ClientError>;

    async fn update(
        &self,
        client: &ScopedClient,
        id: &str,
        patch: &PostPatch,
    ) -> Result<(), ClientError>;

    async fn delete(&self, client: &ScopedClient, id: &str) -> Result<(), ClientError>;

    /// Flip the `public` flag.
    ///
    /// Read-then-write, not atomic: two concurrent toggles can both read the
    /// same value and the backend keeps whichever write lands last.
    async fn toggle_public(&self, client: &ScopedClient, id: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PbPostRepository;

#[async_trait]
impl PostRepository for PbPostRepository {
    async fn list(&self, client: &ScopedClient) -> Result<Vec<Post>, ClientError> {
        client.list_posts().await
    }

    async fn get(&self, client: &ScopedClient, id: &str) -> Result<Post, ClientError> {
        client.get_post(id).await
    }

    async fn create(
        &self,
        client: &ScopedClient,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ClientError> {
        client.create_post(title, content, public).await
    }

    async fn update(
        &self,
        client: &ScopedClient,
        id: &str,
        patch: &PostPatch,
    ) -> Result<(), ClientError> {
        client.update_post(id, patch).await
    }

    async fn delete(&self, client: &ScopedClient, id: &str) -> Result<(), ClientError> {
        client.delete_post(id).await
    }

    async fn toggle_public(&self, client: &ScopedClient, id: &str) -> Result<(), ClientError> {
        let post = client.get_post(id).await?;
        client.update_post(id, &PostPatch::visibility(!post.public)).await
    }
}
