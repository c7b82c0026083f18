use crate::{ConfigError, FromEnv};

/// Origins of the storefront dev servers.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:5174"];

/// Cross-origin policy for browser clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS)
    }
}

impl FromEnv for CorsConfig {
    /// `CORS_ALLOWED_ORIGIN` holds comma-separated origins; unset means the defaults.
    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => {
                let allowed_origins = Self::parse_list(&raw);
                if allowed_origins.is_empty() {
                    return Err(ConfigError::Invalid(
                        "CORS_ALLOWED_ORIGIN cannot be empty".to_string(),
                    ));
                }
                Ok(Self { allowed_origins })
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_defaults_to_local_dev_origins() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(
                config.allowed_origins,
                vec!["http://localhost:5173", "http://localhost:5174"]
            );
        });
    }

    #[test]
    fn test_cors_from_env_splits_and_trims() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some(" https://shop.example.com , http://localhost:3000,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    vec!["https://shop.example.com", "http://localhost:3000"]
                );
            },
        );
    }

    #[test]
    fn test_cors_from_env_rejects_empty_list() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }
}
