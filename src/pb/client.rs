use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::claims::unverified_user_id;
use super::error::ClientError;
use super::models::{
    AuthResponse, ListResponse, NewPost, PasswordCredentials, Post, PostPatch, User,
};

const USERS: &str = "users";
const POSTS: &str = "posts";

/// Process-wide backend handle: base URL plus the pooled HTTP client.
///
/// Cloning is cheap and every clone shares the same connection pool.
/// Callers never talk to the backend through this type directly; they
/// derive a [`ScopedClient`] carrying the request's token first.
#[derive(Clone, Debug)]
pub struct Client {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(base_url, http))
    }

    /// Build on top of an existing pool (tests point this at a fake backend).
    pub fn with_http(base_url: Url, http: reqwest::Client) -> Self {
        Self {
            shared: Arc::new(Shared { base_url, http }),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// Request-scoped view carrying `token`. The user id is recovered from
    /// the token payload when it decodes; otherwise it stays unknown.
    pub fn with_token(&self, token: impl Into<String>) -> ScopedClient {
        let token = token.into();
        let user = unverified_user_id(&token).map(User::with_id);
        ScopedClient {
            shared: self.clone(),
            token,
            user,
        }
    }

    pub fn anonymous(&self) -> ScopedClient {
        ScopedClient {
            shared: self.clone(),
            token: String::new(),
            user: None,
        }
    }
}

/// A single request's view of the backend.
///
/// Owns its token outright; only the pool behind [`Client`] is shared.
#[derive(Clone, Debug)]
pub struct ScopedClient {
    shared: Client,
    token: String,
    user: Option<User>,
}

impl ScopedClient {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn current_user_name(&self) -> &str {
        self.user
            .as_ref()
            .map(User::display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }

    pub fn current_user_email(&self) -> &str {
        self.user.as_ref().map(|u| u.email.as_str()).unwrap_or_default()
    }

    /// POST /api/collections/users/auth-with-password
    pub async fn auth_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, User), ClientError> {
        let operation = "authenticate";
        let body = PasswordCredentials { identity: email, password };
        let req = self
            .request(Method::POST, &["api", "collections", USERS, "auth-with-password"])
            .json(&body);

        let bytes = self.execute(req, operation, &[StatusCode::OK]).await?;
        let auth: AuthResponse = decode(&bytes, operation)?;
        Ok((auth.token, auth.record))
    }

    /// GET /api/collections/users/records/:id
    pub async fn fetch_user(&self, id: &str) -> Result<User, ClientError> {
        self.require_token()?;
        let operation = "fetch user";
        let req = self.request(Method::GET, &["api", "collections", USERS, "records", id]);
        let bytes = self.execute(req, operation, &[StatusCode::OK]).await?;
        decode(&bytes, operation)
    }

    /// GET /api/collections/posts/records. Searching happens in the service.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let operation = "list posts";
        let req = self.request(Method::GET, &["api", "collections", POSTS, "records"]);
        let bytes = self.execute(req, operation, &[StatusCode::OK]).await?;
        let list: ListResponse<Post> = decode(&bytes, operation)?;
        Ok(list.items)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, ClientError> {
        let operation = "get post";
        let req = self.request(Method::GET, &["api", "collections", POSTS, "records", id]);
        let bytes = self.execute(req, operation, &[StatusCode::OK]).await?;
        decode(&bytes, operation)
    }

    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ClientError> {
        self.require_token()?;
        let body = NewPost {
            title,
            content,
            author: self.user_id().unwrap_or_default(),
            public,
        };
        let req = self
            .request(Method::POST, &["api", "collections", POSTS, "records"])
            .json(&body);

        self.execute(req, "create post", &[StatusCode::OK, StatusCode::CREATED])
            .await
            .map(drop)
    }

    pub async fn update_post(&self, id: &str, patch: &PostPatch) -> Result<(), ClientError> {
        self.require_token()?;
        let req = self
            .request(Method::PATCH, &["api", "collections", POSTS, "records", id])
            .json(patch);

        self.execute(req, "update post", &[StatusCode::OK]).await.map(drop)
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ClientError> {
        self.require_token()?;
        let req = self.request(Method::DELETE, &["api", "collections", POSTS, "records", id]);

        self.execute(req, "delete post", &[StatusCode::OK, StatusCode::NO_CONTENT])
            .await
            .map(drop)
    }

    /// Generic record creation; registration goes through here.
    pub async fn create_record<B: Serialize + ?Sized>(
        &self,
        collection: &str,
        fields: &B,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, &["api", "collections", collection, "records"])
            .json(fields);

        self.execute(req, "create record", &[StatusCode::OK, StatusCode::CREATED])
            .await
            .map(drop)
    }

    fn require_token(&self) -> Result<(), ClientError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Unauthorized)
        }
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.shared.base_url().clone();
        // Base URLs are validated as hierarchical at config load.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        let mut req = self.shared.shared.http.request(method, url);
        if self.is_authenticated() {
            req = req.bearer_auth(&self.token);
        }
        req
    }

    async fn execute(
        &self,
        req: RequestBuilder,
        operation: &'static str,
        accepted: &[StatusCode],
    ) -> Result<Bytes, ClientError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "backend request failed");
            ClientError::Transport(e)
        })?;

        let status = resp.status();
        if !accepted.contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(operation, %status, "backend rejected request");
            return Err(ClientError::Rejected { operation, status, body });
        }

        tracing::debug!(operation, %status, "backend request succeeded");
        Ok(resp.bytes().await?)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8], operation: &'static str) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(|source| ClientError::Decode { operation, source })
}
