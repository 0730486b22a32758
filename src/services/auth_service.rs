use std::sync::Arc;

use async_trait::async_trait;

use crate::pb::{NewUser, ScopedClient, User};
use crate::repositories::AuthRepository;

use super::error::ServiceError;

/// Minimum password length accepted at registration, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Returns the bearer token to store in the auth cookie.
    async fn login(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
    ) -> Result<String, ServiceError>;

    async fn register(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ServiceError>;

    /// Full record of the caller, when the token told us who they are.
    async fn current_user(&self, client: &ScopedClient) -> Result<Option<User>, ServiceError>;
}

pub struct RepoAuthService {
    repo: Arc<dyn AuthRepository>,
}

impl RepoAuthService {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthService for RepoAuthService {
    async fn login(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
    ) -> Result<String, ServiceError> {
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("email and password are required"));
        }

        match self.repo.authenticate(client, email, password).await {
            Ok((token, user)) => {
                tracing::info!(user_id = %user.id, "user authenticated");
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "authentication failed");
                Err(ServiceError::AuthenticationFailed(e))
            }
        }
    }

    async fn register(
        &self,
        client: &ScopedClient,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ServiceError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(ServiceError::validation("all fields are required"));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        // Confirmation is compared by the handler before we get here.
        let user = NewUser {
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: password.to_string(),
            name: name.to_string(),
        };
        self.repo.create_user(client, &user).await?;
        tracing::info!(email, "user registered");
        Ok(())
    }

    async fn current_user(&self, client: &ScopedClient) -> Result<Option<User>, ServiceError> {
        let Some(id) = client.user_id() else {
            return Ok(None);
        };
        let user = self.repo.find_user(client, id).await?;
        Ok(Some(user))
    }
}
