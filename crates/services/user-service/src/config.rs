//! User service configuration.

use std::env;
use std::net::SocketAddr;

/// Default gRPC listen port
pub const DEFAULT_PORT: u16 = 50052;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("USER_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("USER_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Resolve the listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let addr = UserServiceConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 50052);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = UserServiceConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(config.socket_addr().is_err());
    }
}
