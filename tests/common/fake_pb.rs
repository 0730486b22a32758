//! In-process stand-in for the PocketBase REST API: users, posts and
//! HS256 auth tokens, all in memory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const SECRET: &[u8] = b"fake-pocketbase-secret";
const TIMESTAMP: &str = "2024-05-01 12:30:00.000Z";

/// Reading this post id always fails with a 500.
pub const FAILING_POST_ID: &str = "post-failing";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    exp: u64,
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub public: bool,
    pub created: String,
    pub updated: String,
}

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<StoredUser>>,
    posts: Mutex<Vec<StoredPost>>,
    hits: AtomicUsize,
    next_id: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Inner>,
    pub base_url: String,
}

impl FakeBackend {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let backend = FakeBackend {
            inner: Arc::default(),
            base_url: format!("http://127.0.0.1:{}", port),
        };

        let router = Router::new()
            .route("/api/collections/users/auth-with-password", post(auth_with_password))
            .route("/api/collections/users/records", post(create_user))
            .route("/api/collections/users/records/:id", get(get_user))
            .route("/api/collections/posts/records", get(list_posts).post(create_post))
            .route(
                "/api/collections/posts/records/:id",
                get(get_post).patch(update_post).delete(delete_post),
            )
            .layer(middleware::from_fn_with_state(backend.clone(), count_hits))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind fake backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(backend)
    }

    pub fn hits(&self) -> usize {
        self.inner.hits.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<StoredPost> {
        self.inner.posts.lock().unwrap().clone()
    }

    pub fn users(&self) -> Vec<StoredUser> {
        self.inner.users.lock().unwrap().clone()
    }

    pub fn add_user(&self, email: &str, password: &str, name: &str) -> StoredUser {
        let user = StoredUser {
            id: self.next_id("u"),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        self.inner.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_post(&self, author: &str, title: &str, content: &str, public: bool) -> StoredPost {
        let post = StoredPost {
            id: self.next_id("p"),
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            public,
            created: TIMESTAMP.to_string(),
            updated: TIMESTAMP.to_string(),
        };
        self.inner.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn token_for(&self, user_id: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = Claims {
            id: user_id.to_string(),
            kind: "authRecord".to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}{:014}", prefix, n)
    }

    /// Caller id from the Authorization header. `Err` when a header is
    /// present but the token does not verify.
    fn caller(&self, headers: &HeaderMap) -> Result<Option<String>, Response> {
        let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) else {
            return Ok(None);
        };
        let token = value.strip_prefix("Bearer ").unwrap_or(value);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(SECRET),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| Some(data.claims.id))
        .map_err(|_| pb_error(StatusCode::UNAUTHORIZED, "The request requires valid record authorization token."))
    }

    fn require_caller(&self, headers: &HeaderMap) -> Result<String, Response> {
        self.caller(headers)?
            .ok_or_else(|| pb_error(StatusCode::UNAUTHORIZED, "The request requires valid record authorization token."))
    }
}

fn pb_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "code": status.as_u16(), "message": message, "data": {} })),
    )
        .into_response()
}

fn user_json(user: &StoredUser) -> Value {
    json!({ "id": user.id, "email": user.email, "name": user.name })
}

async fn count_hits(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    backend.inner.hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

async fn auth_with_password(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let identity = body["identity"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let user = backend
        .users()
        .into_iter()
        .find(|u| u.email == identity && u.password == password);
    match user {
        Some(user) => Json(json!({
            "token": backend.token_for(&user.id),
            "record": user_json(&user),
        }))
        .into_response(),
        None => pb_error(StatusCode::BAD_REQUEST, "Failed to authenticate."),
    }
}

async fn create_user(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
    let (email, password, confirm, name) = (
        field("email"),
        field("password"),
        field("passwordConfirm"),
        field("name"),
    );

    if password != confirm || backend.users().iter().any(|u| u.email == email) {
        return pb_error(StatusCode::BAD_REQUEST, "Failed to create record.");
    }
    let user = backend.add_user(&email, &password, &name);
    Json(user_json(&user)).into_response()
}

async fn get_user(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = backend.require_caller(&headers) {
        return response;
    }
    match backend.users().iter().find(|u| u.id == id) {
        Some(user) => Json(user_json(user)).into_response(),
        None => pb_error(StatusCode::NOT_FOUND, "The requested resource wasn't found."),
    }
}

fn visible_to(post: &StoredPost, caller: Option<&str>) -> bool {
    post.public || caller == Some(post.author.as_str())
}

async fn list_posts(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    let caller = match backend.caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let items: Vec<StoredPost> = backend
        .posts()
        .into_iter()
        .filter(|p| visible_to(p, caller.as_deref()))
        .collect();
    Json(json!({
        "page": 1,
        "perPage": 30,
        "totalItems": items.len(),
        "items": items,
    }))
    .into_response()
}

async fn get_post(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let caller = match backend.caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if id == FAILING_POST_ID {
        return pb_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.");
    }
    match backend
        .posts()
        .into_iter()
        .find(|p| p.id == id && visible_to(p, caller.as_deref()))
    {
        Some(post) => Json(post).into_response(),
        None => pb_error(StatusCode::NOT_FOUND, "The requested resource wasn't found."),
    }
}

async fn create_post(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let caller = match backend.require_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if body["author"].as_str() != Some(caller.as_str()) {
        return pb_error(StatusCode::BAD_REQUEST, "Failed to create record.");
    }
    let post = backend.add_post(
        &caller,
        body["title"].as_str().unwrap_or_default(),
        body["content"].as_str().unwrap_or_default(),
        body["public"].as_bool().unwrap_or(false),
    );
    Json(post).into_response()
}

async fn update_post(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let caller = match backend.require_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let mut posts = backend.inner.posts.lock().unwrap();
    let Some(post) = posts.iter_mut().find(|p| p.id == id && p.author == caller) else {
        return pb_error(StatusCode::NOT_FOUND, "The requested resource wasn't found.");
    };
    if let Some(title) = body["title"].as_str() {
        post.title = title.to_string();
    }
    if let Some(content) = body["content"].as_str() {
        post.content = content.to_string();
    }
    if let Some(public) = body["public"].as_bool() {
        post.public = public;
    }
    Json(post.clone()).into_response()
}

async fn delete_post(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let caller = match backend.require_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let mut posts = backend.inner.posts.lock().unwrap();
    let before = posts.len();
    posts.retain(|p| !(p.id == id && p.author == caller));
    if posts.len() == before {
        return pb_error(StatusCode::NOT_FOUND, "The requested resource wasn't found.");
    }
    StatusCode::NO_CONTENT.into_response()
}
