//! Client configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tonic::transport::{Certificate, ClientTlsConfig, Endpoint, Identity};
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection establishment timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default retry budget. Carried for callers; the client itself never retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// HTTP/2 keep-alive ping settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAliveSettings {
    /// Interval between pings
    pub interval: Duration,
    /// How long to wait for a ping acknowledgement
    pub timeout: Duration,
    /// Ping even when no calls are in flight
    pub while_idle: bool,
}

impl Default for KeepAliveSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(5),
            while_idle: true,
        }
    }
}

/// Transport security settings. PEM files are read when connecting.
///
/// Without `ca_certificate` the server is verified against the bundled
/// webpki root store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSettings {
    /// Server name to verify; defaults to the address host
    pub domain_name: Option<String>,
    /// CA bundle used to verify the server
    pub ca_certificate: Option<PathBuf>,
    /// Client certificate and key for mutual TLS
    pub identity: Option<(PathBuf, PathBuf)>,
}

impl TlsSettings {
    /// True when the server certificate is checked against public roots.
    pub fn uses_public_roots(&self) -> bool {
        self.ca_certificate.is_none()
    }

    pub(crate) async fn load(&self) -> ClientResult<ClientTlsConfig> {
        let mut tls = ClientTlsConfig::new();

        if let Some(domain) = &self.domain_name {
            tls = tls.domain_name(domain.clone());
        }
        match &self.ca_certificate {
            Some(path) => {
                tls = tls.ca_certificate(Certificate::from_pem(read_pem(path).await?));
            }
            None => tls = tls.with_webpki_roots(),
        }
        if let Some((cert, key)) = &self.identity {
            tls = tls.identity(Identity::from_pem(
                read_pem(cert).await?,
                read_pem(key).await?,
            ));
        }

        Ok(tls)
    }
}

/// Parse a boolean environment value; accepts true/false, 1/0, yes/no, on/off.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

async fn read_pem(path: &Path) -> ClientResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::TlsFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Configuration for [`UserServiceClient`](crate::UserServiceClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server address, with or without an `http://`/`https://` scheme
    pub address: String,
    /// `Some` enables TLS
    pub tls: Option<TlsSettings>,
    /// Per-call timeout applied when the caller set no deadline
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Retry budget for callers that implement retries
    pub max_retries: u32,
    pub keep_alive: KeepAliveSettings,
}

impl ClientConfig {
    /// Default configuration for the given address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tls: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            keep_alive: KeepAliveSettings::default(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::new(
            env::var("USER_SERVICE_ADDR").unwrap_or_else(|_| "http://localhost:50052".to_string()),
        );
        let secs = |key: &str, default: Duration| {
            env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };
        let flag = |key: &str, default: bool| match env::var(key) {
            Ok(value) => parse_flag(&value).unwrap_or_else(|| {
                warn!(key, value = %value, default, "Ignoring unrecognized boolean");
                default
            }),
            Err(_) => default,
        };

        let tls = flag("USER_SERVICE_TLS", false).then(|| TlsSettings {
            domain_name: env::var("USER_SERVICE_TLS_DOMAIN").ok(),
            ca_certificate: env::var("USER_SERVICE_TLS_CA").ok().map(PathBuf::from),
            identity: None,
        });

        Self {
            tls,
            timeout: secs("USER_SERVICE_TIMEOUT_SECS", defaults.timeout),
            max_retries: env::var("USER_SERVICE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            keep_alive: KeepAliveSettings {
                interval: secs("USER_SERVICE_KEEPALIVE_SECS", defaults.keep_alive.interval),
                timeout: secs(
                    "USER_SERVICE_KEEPALIVE_TIMEOUT_SECS",
                    defaults.keep_alive.timeout,
                ),
                while_idle: flag(
                    "USER_SERVICE_KEEPALIVE_WHILE_IDLE",
                    defaults.keep_alive.while_idle,
                ),
            },
            ..defaults
        }
    }

    /// Enable TLS with the given settings.
    pub fn with_tls(mut self, tls: TlsSettings) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: KeepAliveSettings) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Reject configurations that cannot produce a working connection.
    pub fn validate(&self) -> ClientResult<()> {
        if self.address.trim().is_empty() {
            return Err(ClientError::InvalidConfig("address is required".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Address with a scheme; bare `host:port` gets one matching the TLS flag.
    pub fn endpoint_uri(&self) -> String {
        let address = self.address.trim();
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else if self.is_tls() {
            format!("https://{}", address)
        } else {
            format!("http://{}", address)
        }
    }

    /// Build a tonic endpoint from this configuration.
    pub(crate) async fn endpoint(&self) -> ClientResult<Endpoint> {
        let uri = self.endpoint_uri();
        let mut endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|source| ClientError::InvalidAddress {
                address: uri,
                source,
            })?
            .connect_timeout(self.connect_timeout)
            .http2_keep_alive_interval(self.keep_alive.interval)
            .keep_alive_timeout(self.keep_alive.timeout)
            .keep_alive_while_idle(self.keep_alive.while_idle);

        if let Some(tls) = &self.tls {
            endpoint = endpoint
                .tls_config(tls.load().await?)
                .map_err(ClientError::Tls)?;
        }

        Ok(endpoint)
    }
}
