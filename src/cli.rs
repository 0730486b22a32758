use clap::Parser;

use crate::config::AppConfig;

/// Command-line overrides, applied on top of the environment.
#[derive(Debug, Parser)]
#[command(name = "mission-log")]
#[command(about = "Mission Log - server-rendered blog over a PocketBase backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Backend base URL (overrides PB_URL)")]
    pub backend_url: Option<String>,

    #[arg(long, help = "Public URL of this site (overrides BASE_URL)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Disable the CSRF check (local testing only)")]
    pub no_csrf: bool,
}

impl Cli {
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.backend_url {
            config.backend.url = url.clone();
        }
        if let Some(url) = &self.base_url {
            config.server.base_url = Some(url.clone());
        }
        if self.no_csrf {
            config.security.csrf_enabled = false;
        }
        config
    }
}
