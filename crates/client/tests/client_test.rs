//! End-to-end tests for the client facade against a loopback server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mockall::predicate::eq;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};
use tonic::{Code, Request};

use domain::{DomainError, PaginatedUsers, User};
use proto::user::{CreateUserRequest, GetUserByIdRequest, GetUsersRequest, LoginRequest};
use user_client_lib::{ClientConfig, ClientError, UserServiceClient};
use user_service_lib::MockUserProvider;

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn start(provider: MockUserProvider) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            user_service_lib::serve_with_incoming(listener, Arc::new(provider), async {
                rx.await.ok();
            })
            .await
            .unwrap();
        });

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new(self.addr.to_string())
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

fn test_user(id: &str) -> User {
    User::new(
        id.to_string(),
        "jane@example.com".to_string(),
        "Jane".to_string(),
        "Doe".to_string(),
    )
}

#[tokio::test]
async fn test_connect_requires_config() {
    let result = UserServiceClient::connect(None).await;
    assert!(matches!(result, Err(ClientError::MissingConfig)));
}

#[tokio::test]
async fn test_connect_rejects_empty_address() {
    let result = UserServiceClient::connect(Some(ClientConfig::new(""))).await;
    assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_connect_reports_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = UserServiceClient::connect(Some(ClientConfig::new(addr.to_string()))).await;
    match result {
        Err(ClientError::Connect { address, .. }) => assert_eq!(address, addr.to_string()),
        other => panic!("expected connect error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_create_user_over_the_wire() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_create_user()
        .times(1)
        .returning(|input| {
            let mut user = test_user("u-1");
            user.email = input.email;
            Ok(user)
        });
    let server = TestServer::start(provider).await;

    let client = assert_ok!(UserServiceClient::connect(Some(server.config())).await);
    let response = assert_ok!(
        client
            .create_user(CreateUserRequest {
                email: "new@example.com".to_string(),
                password: "secret".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            })
            .await
    );

    let user = response.user.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "new@example.com");

    server.stop().await;
}

#[tokio::test]
async fn test_status_codes_survive_the_wire() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_get_user_by_id()
        .with(eq("missing"))
        .returning(|_| Err(DomainError::not_found("user")));
    provider
        .expect_login()
        .returning(|_, _| Err(DomainError::InvalidCredentials));
    let server = TestServer::start(provider).await;

    let client = UserServiceClient::connect(Some(server.config()))
        .await
        .unwrap();

    let err = assert_err!(
        client
            .get_user_by_id(GetUserByIdRequest {
                id: "missing".to_string(),
            })
            .await
    );
    assert_eq!(err.code(), Some(Code::NotFound));
    assert_eq!(err.status().unwrap().message(), "user not found");

    let err = assert_err!(
        client
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
    );
    assert_eq!(err.code(), Some(Code::Unauthenticated));

    // Rejected by the adapter before the provider is consulted
    let err = assert_err!(client.get_user_by_id(GetUserByIdRequest::default()).await);
    assert_eq!(err.code(), Some(Code::InvalidArgument));
    assert_eq!(err.status().unwrap().message(), "id is required");

    server.stop().await;
}

#[tokio::test]
async fn test_health_check() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_list_users()
        .with(eq(1), eq(1))
        .times(1)
        .returning(|page, page_size| Ok(PaginatedUsers::new(vec![], 0, page, page_size)));
    let server = TestServer::start(provider).await;

    let client = UserServiceClient::connect(Some(server.config()))
        .await
        .unwrap();
    assert_ok!(client.health_check().await);

    server.stop().await;
}

#[tokio::test]
async fn test_health_check_reports_provider_failure() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_list_users()
        .returning(|_, _| Err(DomainError::other("database unavailable")));
    let server = TestServer::start(provider).await;

    let client = UserServiceClient::connect(Some(server.config()))
        .await
        .unwrap();
    let err = assert_err!(client.health_check().await);
    assert_eq!(err.code(), Some(Code::Internal));

    server.stop().await;
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let server = TestServer::start(MockUserProvider::new()).await;

    let mut client = UserServiceClient::connect(Some(server.config()))
        .await
        .unwrap();
    assert!(!client.is_closed());

    client.close();
    client.close();
    assert!(client.is_closed());

    let err = assert_err!(client.get_users(GetUsersRequest::default()).await);
    assert!(matches!(err, ClientError::Closed));

    server.stop().await;
}

#[tokio::test]
async fn test_close_leaves_clones_usable() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_list_users()
        .times(1)
        .returning(|page, page_size| Ok(PaginatedUsers::new(vec![], 0, page, page_size)));
    let server = TestServer::start(provider).await;

    let mut client = UserServiceClient::connect(Some(server.config()))
        .await
        .unwrap();
    let clone = client.clone();

    client.close();
    assert!(client.is_closed());
    assert!(!clone.is_closed());
    assert_ok!(clone.health_check().await);

    server.stop().await;
}

#[tokio::test]
async fn test_connect_lazy_defers_dial() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    // Nothing listens on this address; the dial only happens on first use
    let client = assert_ok!(
        UserServiceClient::connect_lazy(Some(ClientConfig::new(addr.to_string()))).await
    );
    assert!(!client.is_closed());

    let err = assert_err!(client.get_users(GetUsersRequest::default()).await);
    assert!(matches!(err, ClientError::Rpc(_)), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_connect_lazy_reaches_server_on_first_call() {
    let mut provider = MockUserProvider::new();
    provider
        .expect_get_user_by_id()
        .with(eq("u-7"))
        .times(1)
        .returning(|id| Ok(test_user(id)));
    let server = TestServer::start(provider).await;

    let client = assert_ok!(UserServiceClient::connect_lazy(Some(server.config())).await);
    let response = assert_ok!(
        client
            .get_user_by_id(GetUserByIdRequest {
                id: "u-7".to_string(),
            })
            .await
    );
    assert_eq!(response.user.unwrap().id, "u-7");

    server.stop().await;
}

#[tokio::test]
async fn test_connect_lazy_requires_config() {
    let result = UserServiceClient::connect_lazy(None).await;
    assert!(matches!(result, Err(ClientError::MissingConfig)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_default_timeout_applies() {
    let mut provider = MockUserProvider::new();
    provider.expect_get_user_by_id().returning(|id| {
        std::thread::sleep(Duration::from_millis(500));
        Ok(test_user(id))
    });
    let server = TestServer::start(provider).await;

    let config = server.config().with_timeout(Duration::from_millis(100));
    let client = UserServiceClient::connect(Some(config)).await.unwrap();

    let err = assert_err!(
        client
            .get_user_by_id(GetUserByIdRequest {
                id: "slow".to_string(),
            })
            .await
    );
    assert!(
        matches!(err.code(), Some(Code::DeadlineExceeded) | Some(Code::Cancelled)),
        "unexpected error: {}",
        err
    );

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_caller_deadline_wins_over_default() {
    let mut provider = MockUserProvider::new();
    provider.expect_get_user_by_id().returning(|id| {
        std::thread::sleep(Duration::from_millis(300));
        Ok(test_user(id))
    });
    let server = TestServer::start(provider).await;

    let config = server.config().with_timeout(Duration::from_millis(50));
    let client = UserServiceClient::connect(Some(config)).await.unwrap();

    let mut request = Request::new(GetUserByIdRequest {
        id: "slow".to_string(),
    });
    request.set_timeout(Duration::from_secs(5));

    let response = assert_ok!(client.get_user_by_id(request).await);
    assert_eq!(response.user.unwrap().id, "slow");

    server.stop().await;
}
