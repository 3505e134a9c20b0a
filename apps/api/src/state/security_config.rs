//! Token-issuance settings.

use std::time::Duration;

/// Immutable security settings, constructed once at startup and carried by
/// [`crate::state::app_state::AppState`]. Nothing reads the environment after
/// construction, so two instances with different secrets can coexist (tests
/// rely on this).
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC key for access tokens.
    pub jwt_secret: Vec<u8>,
    /// Lifetime stamped into freshly issued tokens.
    pub access_token_ttl: Duration,
    /// `iss` claim on issued tokens.
    pub issuer: String,
    /// `aud` claim on issued tokens.
    pub audience: Vec<String>,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: Duration::from_secs(15 * 60),
            issuer: "taskdeck".to_string(),
            audience: vec!["taskdeck-users".to_string()],
        }
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }
}

impl Default for SecurityConfig {
    /// Test-friendly default. Production always goes through
    /// [`crate::config::AppConfig::from_env`], which requires a real secret.
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pin_issuer_and_audience() {
        let config = SecurityConfig::default();
        assert_eq!(config.issuer, "taskdeck");
        assert_eq!(config.audience, vec!["taskdeck-users".to_string()]);
        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
    }

    #[test]
    fn ttl_is_adjustable() {
        let config = SecurityConfig::new(b"k".to_vec())
            .with_access_token_ttl(Duration::from_secs(60));
        assert_eq!(config.access_token_ttl, Duration::from_secs(60));
    }
}
