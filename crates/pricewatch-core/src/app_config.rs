#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    pub log_level: String,
    /// Per-request timeout for a single retailer GET.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Wall-clock budget for one whole price resolution across all attempts.
    pub resolve_deadline_secs: u64,
    /// Pause after a captcha-like response before the next attempt.
    pub captcha_pause_ms: u64,
    pub max_concurrent_resolves: usize,
}
