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
    /// Base URL of the Open Food Facts API.
    pub off_base_url: String,
    pub off_timeout_secs: u64,
    pub off_user_agent: String,
    pub off_max_retries: u32,
    pub off_retry_backoff_base_ms: u64,
    /// Products fetched per category on the recommendation path.
    pub category_page_size: u32,
    /// Default number of ranked candidates returned.
    pub top_n: usize,
    /// Optional YAML override for the rank lookup tables.
    pub rank_tables_path: Option<PathBuf>,
}
