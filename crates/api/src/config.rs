use crate::users::UserProfile;

/// Default display settings for the two household users. The colors
/// are the dashboard's blue-500 and green-500.
pub const USER1_NAME_DEFAULT: &str = "User1";
pub const USER1_COLOR_DEFAULT: &str = "#3b82f6";
pub const USER2_NAME_DEFAULT: &str = "User2";
pub const USER2_COLOR_DEFAULT: &str = "#22c55e";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`
    /// env var. The default `*` allows any origin (the dashboard is
    /// served from an arbitrary LAN address).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Display info for the two configured users.
    pub user1: UserProfile,
    pub user2: UserProfile,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `8001`      |
    /// | `CORS_ORIGINS`         | `*`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `USER1_NAME`           | `User1`     |
    /// | `USER1_COLOR`          | `#3b82f6`   |
    /// | `USER2_NAME`           | `User2`     |
    /// | `USER2_COLOR`          | `#22c55e`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let user1 = UserProfile::from_env("USER1_NAME", "USER1_COLOR")
            .with_defaults(USER1_NAME_DEFAULT, USER1_COLOR_DEFAULT);
        let user2 = UserProfile::from_env("USER2_NAME", "USER2_COLOR")
            .with_defaults(USER2_NAME_DEFAULT, USER2_COLOR_DEFAULT);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            user1,
            user2,
        }
    }
}
