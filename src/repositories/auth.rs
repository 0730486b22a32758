use async_trait::async_trait;

use crate::pb::{ClientError, NewUser, ScopedClient, User};

/// Account data access.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn authenticate(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
    ) -> Result<(String, User), ClientError>;

    async fn create_user(&self, client: &ScopedClient, user: &NewUser) -> Result<(), ClientError>;

    async fn find_user(&self, client: &ScopedClient, id: &str) -> Result<User, ClientError>;
}

/// Backend-backed implementation; every call goes straight to the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct PbAuthRepository;

#[async_trait]
impl AuthRepository for PbAuthRepository {
    async fn authenticate(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
    ) -> Result<(String, User), ClientError> {
        client.auth_with_password(email, password).await
    }

    async fn create_user(&self, client: &ScopedClient, user: &NewUser) -> Result<(), ClientError> {
        client.create_record("users", user).await
    }

    async fn find_user(&self, client: &ScopedClient, id: &str) -> Result<User, ClientError> {
        client.fetch_user(id).await
    }
}
