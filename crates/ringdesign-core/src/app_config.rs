use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Browser origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<String>,
    /// Optional YAML file replacing the built-in vendor list.
    pub vendors_path: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub min_body_chars: usize,
    pub min_image_dimension: u32,
    pub max_images: usize,
    pub rate_limit_per_minute: usize,
}
