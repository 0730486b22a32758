use std::sync::Arc;

use crate::config::AppConfig;
use crate::pb::Client;
use crate::repositories::{PbAuthRepository, PbPostRepository};
use crate::services::{AuthService, PostService, RepoAuthService, RepoPostService};

/// Everything handlers share. Immutable once built; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Client,
    pub auth: Arc<dyn AuthService>,
    pub posts: Arc<dyn PostService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        client: Client,
        auth: Arc<dyn AuthService>,
        posts: Arc<dyn PostService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            client,
            auth,
            posts,
        }
    }

    /// Production wiring: services over the backend repositories.
    pub fn with_backend(config: AppConfig, client: Client) -> Self {
        let auth = Arc::new(RepoAuthService::new(Arc::new(PbAuthRepository)));
        let posts = Arc::new(RepoPostService::new(Arc::new(PbPostRepository)));
        Self::new(config, client, auth, posts)
    }
}
