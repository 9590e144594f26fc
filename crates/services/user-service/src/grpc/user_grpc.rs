//! gRPC implementation for UserService.
//!
//! Each RPC checks that its required fields are present, converts the
//! request into domain inputs, forwards to the [`UserProvider`] and
//! converts the result back. Provider errors are classified by
//! [`common::status_from_error`].

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use common::convert::{page_to_proto, role_from_proto, user_to_proto};
use common::{require_fields, status_from_error};
use domain::{CreateUser, UpdatePassword, UpdateUser, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest, CreateUserResponse,
    DeleteUserRequest, DeleteUserResponse, GetUserByEmailRequest, GetUserByEmailResponse,
    GetUserByIdRequest, GetUserByIdResponse, GetUsersRequest, GetUsersResponse, LoginRequest,
    LoginResponse, UpdatePasswordRequest, UpdatePasswordResponse, UpdateUserRequest,
    UpdateUserResponse, UpdateUserRoleRequest, UpdateUserRoleResponse,
};

use crate::service::UserProvider;

/// gRPC service wrapper around a [`UserProvider`].
///
/// Holds nothing but the provider handle, so one instance can serve any
/// number of concurrent calls.
pub struct UserGrpcService {
    provider: Arc<dyn UserProvider>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(provider: Arc<dyn UserProvider>) -> Self {
        Self { provider }
    }
}

/// Coerce non-positive paging values to the defaults.
pub fn normalize_pagination(page: i64, page_size: i64) -> (i64, i64) {
    let page = if page <= 0 { DEFAULT_PAGE } else { page };
    let page_size = if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    (page, page_size)
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        require_fields(
            &[
                ("email", req.email.as_str()),
                ("password", req.password.as_str()),
                ("first_name", req.first_name.as_str()),
                ("last_name", req.last_name.as_str()),
            ],
            "missing required fields",
        )?;

        let input = CreateUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        };

        let user = self
            .provider
            .create_user(input)
            .await
            .map_err(status_from_error)?;
        debug!(id = %user.id, "User created");

        Ok(Response::new(CreateUserResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn get_user_by_id(
        &self,
        request: Request<GetUserByIdRequest>,
    ) -> Result<Response<GetUserByIdResponse>, Status> {
        let req = request.into_inner();
        require_fields(&[("id", req.id.as_str())], "id is required")?;

        let user = self
            .provider
            .get_user_by_id(&req.id)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(GetUserByIdResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn get_user_by_email(
        &self,
        request: Request<GetUserByEmailRequest>,
    ) -> Result<Response<GetUserByEmailResponse>, Status> {
        let req = request.into_inner();
        require_fields(&[("email", req.email.as_str())], "email is required")?;

        let user = self
            .provider
            .get_user_by_email(&req.email)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(GetUserByEmailResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn get_users(
        &self,
        request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        let req = request.into_inner();
        let (page, page_size) = normalize_pagination(req.page, req.page_size);

        let result = self
            .provider
            .list_users(page, page_size)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(page_to_proto(&result)))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let req = request.into_inner();
        require_fields(&[("id", req.id.as_str())], "id is required")?;

        let input = UpdateUser {
            first_name: req.first_name,
            last_name: req.last_name,
        };

        let user = self
            .provider
            .update_user(&req.id, input)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(UpdateUserResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();
        require_fields(
            &[("id", req.id.as_str()), ("actor_id", req.actor_id.as_str())],
            "id and actor_id are required",
        )?;

        let actor_role = role_from_proto(req.actor_role);

        self.provider
            .delete_user(&req.id, &req.actor_id, actor_role)
            .await
            .map_err(status_from_error)?;
        debug!(id = %req.id, actor_id = %req.actor_id, "User deleted");

        Ok(Response::new(DeleteUserResponse { success: true }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        require_fields(
            &[("email", req.email.as_str()), ("password", req.password.as_str())],
            "email and password are required",
        )?;

        let token = self
            .provider
            .login(&req.email, &req.password)
            .await
            .map_err(status_from_error)?;

        let user = self
            .provider
            .get_user_by_email(&req.email)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(LoginResponse {
            token,
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn update_user_role(
        &self,
        request: Request<UpdateUserRoleRequest>,
    ) -> Result<Response<UpdateUserRoleResponse>, Status> {
        let req = request.into_inner();
        require_fields(&[("id", req.id.as_str())], "id is required")?;

        let role = role_from_proto(req.role);
        let actor_role = role_from_proto(req.actor_role);

        self.provider
            .update_user_role(&req.id, role, actor_role)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(UpdateUserRoleResponse {}))
    }

    async fn update_password(
        &self,
        request: Request<UpdatePasswordRequest>,
    ) -> Result<Response<UpdatePasswordResponse>, Status> {
        let req = request.into_inner();
        require_fields(&[("id", req.id.as_str())], "id is required")?;
        require_fields(
            &[
                ("current_password", req.current_password.as_str()),
                ("new_password", req.new_password.as_str()),
            ],
            "current_password and new_password are required",
        )?;

        let input = UpdatePassword {
            current_password: req.current_password,
            new_password: req.new_password,
        };

        self.provider
            .update_password(&req.id, input)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(UpdatePasswordResponse {}))
    }
}
