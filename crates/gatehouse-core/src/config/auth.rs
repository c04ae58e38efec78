//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token signing configuration.
///
/// The signing secret is carried here and injected into the token codec at
/// construction time; rotating it invalidates every previously issued,
/// unexpired token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
    /// Clock-skew leeway in seconds applied during token validation.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Minimum password length for new credentials.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            leeway_seconds: default_leeway(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> i64 {
    24
}

fn default_leeway() -> u64 {
    5
}

fn default_password_min() -> usize {
    8
}
