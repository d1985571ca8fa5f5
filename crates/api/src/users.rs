//! User display profiles served to the dashboard.

use serde::Serialize;

/// Display name and accent color for one household user.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub color: String,
}

impl UserProfile {
    /// Read a profile from the given environment variables. Missing
    /// variables yield empty strings; call [`with_defaults`] to fill
    /// them in.
    ///
    /// [`with_defaults`]: UserProfile::with_defaults
    pub fn from_env(name_var: &str, color_var: &str) -> Self {
        Self {
            name: std::env::var(name_var).unwrap_or_default(),
            color: std::env::var(color_var).unwrap_or_default(),
        }
    }

    /// Fill empty or malformed fields with defaults, warning when a
    /// default is used so misconfiguration is visible at startup.
    /// A color that does not start with `#` is treated as malformed.
    pub fn with_defaults(mut self, default_name: &str, default_color: &str) -> Self {
        if self.name.is_empty() {
            tracing::warn!(default = default_name, "User name not set, using default");
            self.name = default_name.to_string();
        }
        if !self.color.starts_with('#') {
            tracing::warn!(default = default_color, "User color not set or not a hex value, using default");
            self.color = default_color.to_string();
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
