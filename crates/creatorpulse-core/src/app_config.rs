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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory of per-creator JSON snapshots written by the collector.
    pub data_dir: PathBuf,
    pub categories_path: PathBuf,
    pub generator_base_url: String,
    pub generator_model: String,
    pub generator_timeout_secs: u64,
    /// API key for the external text generator. Optional at load time;
    /// only generation calls require it.
    pub generator_api_key: Option<String>,
    /// Default audience size engagement projections are scaled to.
    pub target_followers: u64,
    /// Below this many usable posts, evidence is flagged insufficient.
    pub min_evidence_posts: usize,
    /// Number of recent posts sampled for style exemplars.
    pub sample_posts_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("categories_path", &self.categories_path)
            .field("generator_base_url", &self.generator_base_url)
            .field("generator_model", &self.generator_model)
            .field("generator_timeout_secs", &self.generator_timeout_secs)
            .field(
                "generator_api_key",
                &self.generator_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("target_followers", &self.target_followers)
            .field("min_evidence_posts", &self.min_evidence_posts)
            .field("sample_posts_limit", &self.sample_posts_limit)
            .finish()
    }
}
