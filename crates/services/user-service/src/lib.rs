//! User Service Library
//!
//! This crate exposes the `user.v1.UserService` gRPC surface on top of a
//! [`UserProvider`] supplied by the embedding application. It keeps no
//! user state of its own.

pub mod config;
pub mod grpc;
pub mod service;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::grpc::UserGrpcService;

pub use crate::service::UserProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use crate::service::MockUserProvider;

/// Boxed error returned by the serve helpers.
pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

/// Build the tonic service for a provider.
pub fn user_service(provider: Arc<dyn UserProvider>) -> proto::UserServiceServer<UserGrpcService> {
    proto::UserServiceServer::new(UserGrpcService::new(provider))
}

/// Run the gRPC server until it fails.
pub async fn serve(
    config: &UserServiceConfig,
    provider: Arc<dyn UserProvider>,
) -> Result<(), ServeError> {
    serve_with_shutdown(config, provider, std::future::pending()).await
}

/// Run the gRPC server until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    config: &UserServiceConfig,
    provider: Arc<dyn UserProvider>,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send,
{
    let addr = config.socket_addr()?;
    info!(%addr, "User service listening");

    Server::builder()
        .add_service(user_service(provider))
        .serve_with_shutdown(addr, shutdown)
        .await?;

    info!("User service stopped");
    Ok(())
}

/// Run the gRPC server on an already bound listener until `shutdown` resolves.
pub async fn serve_with_incoming<F>(
    listener: TcpListener,
    provider: Arc<dyn UserProvider>,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "User service listening");
    }

    Server::builder()
        .add_service(user_service(provider))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    Ok(())
}
