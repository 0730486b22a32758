//! In-memory doubles for the repository seams, plus helpers to assemble an
//! [`AppState`] around them for router-level tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::config::AppConfig;
use crate::pb::{Client, ClientError, NewUser, Post, PostPatch, ScopedClient, User};
use crate::repositories::{AuthRepository, PostRepository};
use crate::services::{RepoAuthService, RepoPostService};
use crate::state::AppState;

/// A client whose backend is never contacted; the fakes below stand in for it.
pub fn backend_client() -> Client {
    Client::new(
        Url::parse("http://127.0.0.1:9").expect("static url"),
        Duration::from_millis(100),
    )
    .expect("client")
}

pub fn sample_post(id: &str, title: &str, content: &str, public: bool) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        author: "user-1".to_string(),
        public,
        created: "2024-05-01 12:30:00.000Z".to_string(),
        updated: "2024-05-01 12:30:00.000Z".to_string(),
    }
}

pub fn rejected(operation: &'static str, status: StatusCode) -> ClientError {
    ClientError::Rejected {
        operation,
        status,
        body: String::new(),
    }
}

#[derive(Default)]
pub struct FakeAuthRepository {
    credentials: Option<(String, String, String)>,
    users: Vec<User>,
    fail_creates: bool,
    created: Mutex<Vec<NewUser>>,
    calls: AtomicUsize,
}

impl FakeAuthRepository {
    pub fn accepting(email: &str, password: &str, token: &str) -> Self {
        Self {
            credentials: Some((email.to_string(), password.to_string(), token.to_string())),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, id: &str, email: &str, name: &str) -> Self {
        self.users.push(User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn created_users(&self) -> Vec<NewUser> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthRepository for FakeAuthRepository {
    async fn authenticate(
        &self,
        _client: &ScopedClient,
        email: &str,
        password: &str,
    ) -> Result<(String, User), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.credentials {
            Some((e, p, token)) if e == email && p == password => Ok((
                token.clone(),
                User {
                    id: "user-1".to_string(),
                    email: email.to_string(),
                    name: String::new(),
                },
            )),
            _ => Err(rejected("authenticate", StatusCode::BAD_REQUEST)),
        }
    }

    async fn create_user(&self, _client: &ScopedClient, user: &NewUser) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates {
            return Err(rejected("create record", StatusCode::BAD_REQUEST));
        }
        self.created.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_user(&self, client: &ScopedClient, id: &str) -> Result<User, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !client.is_authenticated() {
            return Err(ClientError::Unauthorized);
        }
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| rejected("fetch user", StatusCode::NOT_FOUND))
    }
}

#[derive(Default)]
pub struct FakePostRepository {
    posts: Mutex<Vec<Post>>,
    last_patch: Mutex<Option<PostPatch>>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakePostRepository {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Default::default()
        }
    }

    /// Every call is rejected with a 500.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    pub fn last_patch(&self) -> Option<PostPatch> {
        self.last_patch.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self, operation: &'static str) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(rejected(operation, StatusCode::INTERNAL_SERVER_ERROR))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostRepository for FakePostRepository {
    async fn list(&self, _client: &ScopedClient) -> Result<Vec<Post>, ClientError> {
        self.begin("list posts")?;
        Ok(self.posts())
    }

    async fn get(&self, _client: &ScopedClient, id: &str) -> Result<Post, ClientError> {
        self.begin("get post")?;
        self.posts()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| rejected("get post", StatusCode::NOT_FOUND))
    }

    async fn create(
        &self,
        client: &ScopedClient,
        title: &str,
        content: &str,
        public: bool,
    ) -> Result<(), ClientError> {
        self.begin("create post")?;
        let mut posts = self.posts.lock().unwrap();
        let id = format!("p{}", posts.len() + 1);
        let mut post = sample_post(&id, title, content, public);
        post.author = client.user_id().unwrap_or_default().to_string();
        posts.push(post);
        Ok(())
    }

    async fn update(
        &self,
        _client: &ScopedClient,
        id: &str,
        patch: &PostPatch,
    ) -> Result<(), ClientError> {
        self.begin("update post")?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| rejected("update post", StatusCode::NOT_FOUND))?;
        if let Some(title) = &patch.title {
            post.title = title.clone();
        }
        if let Some(content) = &patch.content {
            post.content = content.clone();
        }
        if let Some(public) = patch.public {
            post.public = public;
        }
        *self.last_patch.lock().unwrap() = Some(patch.clone());
        Ok(())
    }

    async fn delete(&self, _client: &ScopedClient, id: &str) -> Result<(), ClientError> {
        self.begin("delete post")?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(rejected("delete post", StatusCode::NOT_FOUND));
        }
        Ok(())
    }

    async fn toggle_public(&self, client: &ScopedClient, id: &str) -> Result<(), ClientError> {
        let post = self.get(client, id).await?;
        self.update(client, id, &PostPatch::visibility(!post.public)).await
    }
}

/// Development defaults with the CSRF gate off, so form posts in router tests
/// do not need a token round-trip.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.csrf_enabled = false;
    config
}

pub fn test_state(
    config: AppConfig,
    auth_repo: Arc<FakeAuthRepository>,
    post_repo: Arc<FakePostRepository>,
) -> AppState {
    AppState::new(
        config,
        backend_client(),
        Arc::new(RepoAuthService::new(auth_repo)),
        Arc::new(RepoPostService::new(post_repo)),
    )
}
