use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Number of repositories returned by the repository listing when `REPO_LIST_LIMIT` is not set.
pub const DEFAULT_REPO_LIST_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// OAuth application client ID registered with GitHub.
    #[arg(long, env)]
    github_client_id: Option<String>,

    /// OAuth application client secret registered with GitHub.
    #[arg(long, env, hide_env_values = true)]
    github_client_secret: Option<String>,

    /// Callback URL GitHub redirects to after authorization.
    #[arg(long, env, default_value = "http://localhost:4000/github/auth/callback")]
    github_redirect_uri: String,

    /// Override the GitHub authorization endpoint.
    #[arg(long, env)]
    github_auth_url: Option<String>,

    /// Override the GitHub token endpoint.
    #[arg(long, env)]
    github_token_url: Option<String>,

    /// Override the GitHub REST API base URL.
    /// Override in tests to point at a mock server.
    #[arg(long, env)]
    github_api_url: Option<String>,

    /// OAuth application client ID registered with GitLab.
    #[arg(long, env)]
    gitlab_client_id: Option<String>,

    /// OAuth application client secret registered with GitLab.
    #[arg(long, env, hide_env_values = true)]
    gitlab_client_secret: Option<String>,

    /// Callback URL GitLab redirects to after authorization.
    #[arg(long, env, default_value = "http://localhost:4000/gitlab/auth/callback")]
    gitlab_redirect_uri: String,

    /// Override the GitLab authorization endpoint.
    #[arg(long, env)]
    gitlab_auth_url: Option<String>,

    /// Override the GitLab token endpoint.
    #[arg(long, env)]
    gitlab_token_url: Option<String>,

    /// Override the GitLab REST API base URL.
    #[arg(long, env)]
    gitlab_api_url: Option<String>,

    /// The base URL of the frontend application. Users land on `<base>/dashboard`
    /// after a successful login.
    #[arg(long, env, default_value = "http://localhost:3000")]
    frontend_base_url: String,

    /// Maximum number of repositories returned by the repository listing.
    #[arg(long, env, default_value_t = DEFAULT_REPO_LIST_LIMIT)]
    pub repo_list_limit: usize,

    /// Timeout in seconds for every outbound call to GitHub or GitLab
    #[arg(long, env, default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,

    /// Session expiry duration in seconds (default: 1 hour)
    #[arg(long, env, default_value_t = 3600)]
    pub session_expiry_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// GitHub client ID; empty when not configured.
    pub fn github_client_id(&self) -> &str {
        self.github_client_id.as_deref().unwrap_or_default()
    }

    /// GitHub client secret; empty when not configured.
    pub fn github_client_secret(&self) -> &str {
        self.github_client_secret.as_deref().unwrap_or_default()
    }

    pub fn github_redirect_uri(&self) -> &str {
        &self.github_redirect_uri
    }

    pub fn github_auth_url(&self) -> Option<&str> {
        self.github_auth_url.as_deref()
    }

    pub fn github_token_url(&self) -> Option<&str> {
        self.github_token_url.as_deref()
    }

    pub fn github_api_url(&self) -> Option<&str> {
        self.github_api_url.as_deref()
    }

    /// GitLab client ID; empty when not configured.
    pub fn gitlab_client_id(&self) -> &str {
        self.gitlab_client_id.as_deref().unwrap_or_default()
    }

    /// GitLab client secret; empty when not configured.
    pub fn gitlab_client_secret(&self) -> &str {
        self.gitlab_client_secret.as_deref().unwrap_or_default()
    }

    pub fn gitlab_redirect_uri(&self) -> &str {
        &self.gitlab_redirect_uri
    }

    pub fn gitlab_auth_url(&self) -> Option<&str> {
        self.gitlab_auth_url.as_deref()
    }

    pub fn gitlab_token_url(&self) -> Option<&str> {
        self.gitlab_token_url.as_deref()
    }

    pub fn gitlab_api_url(&self) -> Option<&str> {
        self.gitlab_api_url.as_deref()
    }

    /// Returns the frontend application base URL, without a trailing slash.
    pub fn frontend_base_url(&self) -> &str {
        self.frontend_base_url.trim_end_matches('/')
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
