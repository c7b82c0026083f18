use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Bind on all interfaces unless `HOST` says otherwise.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Listener settings for the HTTP server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, as accepted by `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

/// `HOST` and `PORT`; a `PORT` that is not a valid u16 is an error.
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("HOST", DEFAULT_HOST),
            port: env_parse_or("PORT", DEFAULT_PORT)?,
        })
    }
}
