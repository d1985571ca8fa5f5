//! Agent configuration loaded from environment variables.

use std::collections::HashMap;
use std::time::Duration;

use spindown_core::types::Appliance;

/// Default interval between evaluation cycles.
pub const DEFAULT_EVAL_INTERVAL_SECS: u64 = 5;

/// Default ingest listen port.
pub const DEFAULT_PORT: u16 = 8005;

/// Credentials and endpoint for the SMS gateway.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub url: String,
    pub user: String,
    pub password: String,
}

/// Agent process configuration.
///
/// | Variable              | Required | Default | Description                                  |
/// |-----------------------|----------|---------|----------------------------------------------|
/// | `API_SERVER_URL`      | yes      | --      | Base URL of the status registry              |
/// | `APPLIANCE`           | no       | `dryer` | Which appliance this agent watches           |
/// | `PORT`                | no       | `8005`  | Ingest listen port                           |
/// | `EVAL_INTERVAL_SECS`  | no       | `5`     | Seconds between evaluation cycles            |
/// | `SEND_SMS_URL`        | no       | --      | SMS gateway endpoint (notifications off when unset) |
/// | `SMS_USER`            | no       | --      | SMS gateway basic-auth user                  |
/// | `SMS_PASSWORD`        | no       | --      | SMS gateway basic-auth password              |
/// | `USER1_PHONE_NUMBER`  | no       | --      | Destination for user `user1`                 |
/// | `USER2_PHONE_NUMBER`  | no       | --      | Destination for user `user2`                 |
/// | `NOTIFY_ALL_USERS`    | no       | `false` | Notify every configured number, not just the monitor owner |
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_server_url: String,
    pub appliance: Appliance,
    pub port: u16,
    pub eval_interval: Duration,
    pub sms: Option<SmsConfig>,
    /// Registry user identifier -> destination phone number.
    pub phone_numbers: HashMap<String, String>,
    pub notify_all_users: bool,
}

impl AgentConfig {
    /// Load configuration from the environment, exiting with a logged
    /// error when a required variable is missing or malformed.
    pub fn from_env() -> Self {
        let api_server_url = std::env::var("API_SERVER_URL").unwrap_or_else(|_| {
            tracing::error!("API_SERVER_URL environment variable is required");
            std::process::exit(1);
        });

        let appliance: Appliance = std::env::var("APPLIANCE")
            .unwrap_or_else(|_| "dryer".into())
            .parse()
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "APPLIANCE must be 'washer' or 'dryer'");
                std::process::exit(1);
            });

        let port: u16 = parse_or_default(std::env::var("PORT").ok(), DEFAULT_PORT)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "PORT must be a valid port number");
                std::process::exit(1);
            });

        let eval_interval_secs: u64 = parse_or_default(
            std::env::var("EVAL_INTERVAL_SECS").ok(),
            DEFAULT_EVAL_INTERVAL_SECS,
        )
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "EVAL_INTERVAL_SECS must be a whole number of seconds");
            std::process::exit(1);
        });

        let sms = match (
            std::env::var("SEND_SMS_URL"),
            std::env::var("SMS_USER"),
            std::env::var("SMS_PASSWORD"),
        ) {
            (Ok(url), Ok(user), Ok(password)) => Some(SmsConfig {
                url,
                user,
                password,
            }),
            _ => {
                tracing::warn!("SMS gateway not fully configured, notifications disabled");
                None
            }
        };

        let mut phone_numbers = HashMap::new();
        for (user, var) in [("user1", "USER1_PHONE_NUMBER"), ("user2", "USER2_PHONE_NUMBER")] {
            if let Ok(number) = std::env::var(var) {
                if !number.trim().is_empty() {
                    phone_numbers.insert(user.to_string(), number.trim().to_string());
                }
            }
        }

        let notify_all_users = std::env::var("NOTIFY_ALL_USERS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Self {
            api_server_url,
            appliance,
            port,
            eval_interval: Duration::from_secs(eval_interval_secs),
            sms,
            phone_numbers,
            notify_all_users,
        }
    }
}

/// Parse an optional env value. An unset variable falls back to the
/// default; a set-but-malformed value is an error, never a silent
/// fallback.
fn parse_or_default<T: std::str::FromStr>(raw: Option<String>, default: T) -> Result<T, T::Err> {
    match raw {
        Some(raw) => raw.trim().parse(),
        None => Ok(default),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
