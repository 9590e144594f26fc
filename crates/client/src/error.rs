//! Client error types.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tonic::{Code, Status};

/// Errors returned by [`UserServiceClient`](crate::UserServiceClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// No configuration was supplied
    #[error("client config is required")]
    MissingConfig,

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid server address {address}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to read TLS material from {}: {source}", path.display())]
    TlsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TLS configuration: {0}")]
    Tls(#[source] tonic::transport::Error),

    /// The underlying transport could not be established
    #[error("failed to connect to gRPC server at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The client-side deadline elapsed before the server answered
    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    /// The connection was released by `close`
    #[error("client is closed")]
    Closed,

    /// The server answered with a non-OK status
    #[error("{}: {}", .0.code(), .0.message())]
    Rpc(#[from] Status),
}

impl ClientError {
    /// gRPC status code for call failures; `None` for setup errors.
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Rpc(status) => Some(status.code()),
            ClientError::Timeout(_) => Some(Code::DeadlineExceeded),
            ClientError::Closed => Some(Code::Unavailable),
            _ => None,
        }
    }

    /// Server status, if the server answered.
    pub fn status(&self) -> Option<&Status> {
        match self {
            ClientError::Rpc(status) => Some(status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
