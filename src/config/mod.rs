use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub oauth: OAuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://...` or `memory://`
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC secret for session tokens
    pub session_secret: String,
    pub session_expiry_hours: u64,
    pub secure_cookies: bool,
    pub enable_cors: bool,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub google_client_id: Option<String>,
    #[serde(skip_serializing)]
    pub google_client_secret: Option<String>,
    pub google_callback_url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

const DEVELOPMENT_SESSION_SECRET: &str = "development-session-secret";

/// Longest session lifetime `validate()` accepts (one year).
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 24 * 365;

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid { name, value })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source: `APP_ENV` picks the preset,
    /// then individual variables override it. Unparseable numbers and flags are
    /// reported as `ConfigError::Invalid`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").or_else(|| lookup("NODE_ENV")).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some((name, v)) = lookup("CATALOG_API_PORT")
            .map(|v| ("CATALOG_API_PORT", v))
            .or_else(|| lookup("PORT").map(|v| ("PORT", v)))
        {
            self.server.port = parse_var(name, v)?;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", v)?;
        }

        // Security overrides
        if let Some(v) = lookup("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Some(v) = lookup("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = parse_var("SESSION_EXPIRY_HOURS", v)?;
        }
        if let Some(v) = lookup("SECURITY_SECURE_COOKIES") {
            self.security.secure_cookies = parse_var("SECURITY_SECURE_COOKIES", v)?;
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse_var("SECURITY_ENABLE_CORS", v)?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // OAuth overrides
        if let Some(v) = lookup("GOOGLE_CLIENT_ID") {
            self.oauth.google_client_id = Some(v);
        }
        if let Some(v) = lookup("GOOGLE_CLIENT_SECRET") {
            self.oauth.google_client_secret = Some(v);
        }
        match lookup("GOOGLE_CALLBACK_URL") {
            Some(v) => self.oauth.google_callback_url = v,
            None if self.environment == Environment::Development => {
                self.oauth.google_callback_url =
                    format!("http://localhost:{}/auth/google/callback", self.server.port);
            }
            None => {}
        }

        Ok(self)
    }

    /// Settings the server cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.security.session_secret.is_empty() {
            return Err(ConfigError::Missing("SESSION_SECRET"));
        }
        let expiry = self.security.session_expiry_hours;
        if expiry == 0 || expiry > MAX_SESSION_EXPIRY_HOURS {
            return Err(ConfigError::Invalid {
                name: "SESSION_EXPIRY_HOURS",
                value: expiry.to_string(),
            });
        }
        if self.environment == Environment::Production
            && self.security.session_secret == DEVELOPMENT_SESSION_SECRET
        {
            return Err(ConfigError::Invalid {
                name: "SESSION_SECRET",
                value: "development default".to_string(),
            });
        }
        if self.oauth.google_client_id.is_some() != self.oauth.google_client_secret.is_some() {
            return Err(ConfigError::Missing(if self.oauth.google_client_id.is_some() {
                "GOOGLE_CLIENT_SECRET"
            } else {
                "GOOGLE_CLIENT_ID"
            }));
        }
        Ok(())
    }

    pub fn oauth_enabled(&self) -> bool {
        self.oauth.google_client_id.is_some() && self.oauth.google_client_secret.is_some()
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                session_secret: DEVELOPMENT_SESSION_SECRET.to_string(),
                session_expiry_hours: 24 * 7, // 1 week
                secure_cookies: false,
                enable_cors: true,
                cors_origins: Vec::new(),
            },
            oauth: OAuthConfig {
                google_client_id: None,
                google_client_secret: None,
                google_callback_url: "http://localhost:3000/auth/google/callback".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_expiry_hours: 24,
                secure_cookies: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            oauth: OAuthConfig {
                google_client_id: None,
                google_client_secret: None,
                google_callback_url: "https://staging.example.com/auth/google/callback".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_expiry_hours: 4,
                secure_cookies: true,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            oauth: OAuthConfig {
                google_client_id: None,
                google_client_secret: None,
                google_callback_url: "https://app.example.com/auth/google/callback".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_default_development_config() {
        let config = config_from(&[]);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert!(!config.security.secure_cookies);
        assert!(!config.oauth_enabled());
        assert_eq!(config.validate(), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_default_production_config() {
        let config = config_from(&[("APP_ENV", "production"), ("DATABASE_URL", "memory://")]);
        assert_eq!(config.environment, Environment::Production);
        assert!(config.security.secure_cookies);
        assert_eq!(config.validate(), Err(ConfigError::Missing("SESSION_SECRET")));
    }

    #[test]
    fn production_rejects_the_development_secret() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "memory://"),
            ("SESSION_SECRET", DEVELOPMENT_SESSION_SECRET),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { name: "SESSION_SECRET", .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("SESSION_SECRET", "s3cret"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
        ]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/catalog"));
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.security.session_secret, "s3cret");
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.oauth.google_callback_url, "http://localhost:8080/auth/google/callback");
        assert!(config.oauth_enabled());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn specific_port_wins_over_generic() {
        let config = config_from(&[("PORT", "8080"), ("CATALOG_API_PORT", "9090")]);
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn half_configured_oauth_is_rejected() {
        let config = config_from(&[("DATABASE_URL", "memory://"), ("GOOGLE_CLIENT_ID", "id")]);
        assert_eq!(config.validate(), Err(ConfigError::Missing("GOOGLE_CLIENT_SECRET")));
    }

    #[test]
    fn unparseable_overrides_are_reported() {
        let parse = |vars: &[(&str, &str)]| {
            let vars: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            AppConfig::from_lookup(|key| vars.get(key).cloned())
        };

        assert_eq!(
            parse(&[("PORT", "abc")]).err(),
            Some(ConfigError::Invalid { name: "PORT", value: "abc".into() })
        );
        assert_eq!(
            parse(&[("SECURITY_SECURE_COOKIES", "yes")]).err(),
            Some(ConfigError::Invalid { name: "SECURITY_SECURE_COOKIES", value: "yes".into() })
        );
        assert!(matches!(
            parse(&[("DATABASE_MAX_CONNECTIONS", "-1")]),
            Err(ConfigError::Invalid { name: "DATABASE_MAX_CONNECTIONS", .. })
        ));
        assert!(parse(&[("SECURITY_ENABLE_CORS", "false"), ("PORT", " 4000 ")]).is_ok());
    }

    #[test]
    fn session_lifetime_is_bounded() {
        for hours in ["0", "8761", "10000000000000"] {
            let config = config_from(&[("DATABASE_URL", "memory://"), ("SESSION_EXPIRY_HOURS", hours)]);
            assert_eq!(
                config.validate(),
                Err(ConfigError::Invalid { name: "SESSION_EXPIRY_HOURS", value: hours.to_string() })
            );
        }
        let config = config_from(&[("DATABASE_URL", "memory://"), ("SESSION_EXPIRY_HOURS", "8760")]);
        assert_eq!(config.validate(), Ok(()));
    }
}
