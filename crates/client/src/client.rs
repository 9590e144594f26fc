//! gRPC client facade for user-service.

use std::future::Future;

use tonic::transport::Channel;
use tonic::{IntoRequest, Request, Response, Status};
use tracing::{debug, warn};

use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, CreateUserRequest,
    CreateUserResponse, DeleteUserRequest, DeleteUserResponse, GetUserByEmailRequest,
    GetUserByEmailResponse, GetUserByIdRequest, GetUserByIdResponse, GetUsersRequest,
    GetUsersResponse, LoginRequest, LoginResponse, UpdatePasswordRequest, UpdatePasswordResponse,
    UpdateUserRequest, UpdateUserResponse, UpdateUserRoleRequest, UpdateUserRoleResponse,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Metadata key tonic uses to carry a call deadline.
const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// gRPC client wrapper for user-service.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    client: Option<ProtoUserServiceClient<Channel>>,
    config: ClientConfig,
}

impl UserServiceClient {
    /// Connect to user-service.
    ///
    /// Fails without any I/O when `config` is `None` or invalid.
    pub async fn connect(config: Option<ClientConfig>) -> ClientResult<Self> {
        let config = config.ok_or(ClientError::MissingConfig)?;
        config.validate()?;

        let endpoint = config.endpoint().await?;
        debug!("Connecting to user-service at {}", config.endpoint_uri());

        let channel = endpoint
            .connect()
            .await
            .map_err(|source| ClientError::Connect {
                address: config.address.clone(),
                source,
            })?;

        Ok(Self::with_channel(channel, config))
    }

    /// Build a client whose connection is established on the first call.
    pub async fn connect_lazy(config: Option<ClientConfig>) -> ClientResult<Self> {
        let config = config.ok_or(ClientError::MissingConfig)?;
        config.validate()?;

        let channel = config.endpoint().await?.connect_lazy();
        Ok(Self::with_channel(channel, config))
    }

    /// Wrap an existing channel.
    pub fn with_channel(channel: Channel, config: ClientConfig) -> Self {
        Self {
            client: Some(ProtoUserServiceClient::new(channel)),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Release this handle's connection. Safe to call more than once.
    ///
    /// Clones share one channel, so the transport stays open until every
    /// clone has been closed or dropped; other clones keep working.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Closed connection to {}", self.config.endpoint_uri());
        }
    }

    /// Run one RPC, applying the configured timeout when the request has none.
    ///
    /// The timeout is sent to the server as `grpc-timeout` and also enforced
    /// locally; it lives exactly as long as this call.
    async fn call<Req, Resp, F, Fut>(
        &self,
        mut request: Request<Req>,
        rpc: F,
    ) -> ClientResult<Resp>
    where
        F: FnOnce(ProtoUserServiceClient<Channel>, Request<Req>) -> Fut,
        Fut: Future<Output = Result<Response<Resp>, Status>>,
    {
        let client = self.client.clone().ok_or(ClientError::Closed)?;

        let response = if request.metadata().contains_key(GRPC_TIMEOUT_HEADER) {
            rpc(client, request).await?
        } else {
            let timeout = self.config.timeout;
            request.set_timeout(timeout);
            tokio::time::timeout(timeout, rpc(client, request))
                .await
                .map_err(|_| ClientError::Timeout(timeout))??
        };

        Ok(response.into_inner())
    }

    /// Create a new user.
    pub async fn create_user(
        &self,
        request: impl IntoRequest<CreateUserRequest>,
    ) -> ClientResult<CreateUserResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.create_user(request).await
        })
        .await
    }

    /// Get user by ID.
    pub async fn get_user_by_id(
        &self,
        request: impl IntoRequest<GetUserByIdRequest>,
    ) -> ClientResult<GetUserByIdResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.get_user_by_id(request).await
        })
        .await
    }

    /// Get user by email.
    pub async fn get_user_by_email(
        &self,
        request: impl IntoRequest<GetUserByEmailRequest>,
    ) -> ClientResult<GetUserByEmailResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.get_user_by_email(request).await
        })
        .await
    }

    /// List users with pagination.
    pub async fn get_users(
        &self,
        request: impl IntoRequest<GetUsersRequest>,
    ) -> ClientResult<GetUsersResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.get_users(request).await
        })
        .await
    }

    /// Update user.
    pub async fn update_user(
        &self,
        request: impl IntoRequest<UpdateUserRequest>,
    ) -> ClientResult<UpdateUserResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.update_user(request).await
        })
        .await
    }

    /// Delete user.
    pub async fn delete_user(
        &self,
        request: impl IntoRequest<DeleteUserRequest>,
    ) -> ClientResult<DeleteUserResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.delete_user(request).await
        })
        .await
    }

    /// Login and get a session token.
    pub async fn login(
        &self,
        request: impl IntoRequest<LoginRequest>,
    ) -> ClientResult<LoginResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.login(request).await
        })
        .await
    }

    /// Change a user's role.
    pub async fn update_user_role(
        &self,
        request: impl IntoRequest<UpdateUserRoleRequest>,
    ) -> ClientResult<UpdateUserRoleResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.update_user_role(request).await
        })
        .await
    }

    /// Change a user's password.
    pub async fn update_password(
        &self,
        request: impl IntoRequest<UpdatePasswordRequest>,
    ) -> ClientResult<UpdatePasswordResponse> {
        self.call(request.into_request(), |mut client, request| async move {
            client.update_password(request).await
        })
        .await
    }

    /// Check that the service answers a minimal listing request.
    pub async fn health_check(&self) -> ClientResult<()> {
        let request = GetUsersRequest {
            page: 1,
            page_size: 1,
        };

        self.get_users(request).await.map(|_| ()).inspect_err(|e| {
            warn!(error = %e, "user-service health check failed");
        })
    }
}
