//! user-client - command-line access to user-service.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::convert::{page_from_proto, role_to_proto, user_from_proto};
use domain::{User, UserRole};
use proto::user::{
    CreateUserRequest, DeleteUserRequest, GetUserByEmailRequest, GetUserByIdRequest,
    GetUsersRequest, LoginRequest, UpdatePasswordRequest, UpdateUserRequest,
    UpdateUserRoleRequest,
};
use user_client_lib::{ClientConfig, UserServiceClient};

#[derive(Parser)]
#[command(name = "user-client")]
#[command(about = "Call user-service over gRPC")]
struct Cli {
    /// Server address (host:port or URL)
    #[arg(long, global = true, env = "USER_SERVICE_ADDR")]
    addr: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Moderator,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => UserRole::User,
            RoleArg::Moderator => UserRole::Moderator,
            RoleArg::Admin => UserRole::Admin,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is reachable
    Health,
    /// Get a user by ID
    Get {
        #[arg(long)]
        id: String,
    },
    /// Get a user by email
    GetByEmail {
        #[arg(long)]
        email: String,
    },
    /// List users
    List {
        #[arg(long, default_value = "1")]
        page: i64,
        #[arg(long, default_value = "10")]
        page_size: i64,
    },
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_PASSWORD")]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Update a user's name
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Delete a user
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long)]
        actor_id: String,
        #[arg(long, value_enum)]
        actor_role: RoleArg,
    },
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_PASSWORD")]
        password: String,
    },
    /// Change a user's role
    SetRole {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long, value_enum)]
        actor_role: RoleArg,
    },
    /// Change a user's password
    SetPassword {
        #[arg(long)]
        id: String,
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        new_password: String,
    },
}

#[derive(Serialize)]
struct LoginOutput {
    token: String,
    user: Option<User>,
}

#[derive(Serialize)]
struct StatusOutput {
    success: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(
    client: &UserServiceClient,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Health => {
            client.health_check().await?;
            print_json(&StatusOutput { success: true })
        }
        Commands::Get { id } => {
            let response = client.get_user_by_id(GetUserByIdRequest { id }).await?;
            print_json(&response.user.map(user_from_proto))
        }
        Commands::GetByEmail { email } => {
            let response = client
                .get_user_by_email(GetUserByEmailRequest { email })
                .await?;
            print_json(&response.user.map(user_from_proto))
        }
        Commands::List { page, page_size } => {
            let response = client
                .get_users(GetUsersRequest { page, page_size })
                .await?;
            print_json(&page_from_proto(response))
        }
        Commands::Create {
            email,
            password,
            first_name,
            last_name,
        } => {
            let response = client
                .create_user(CreateUserRequest {
                    email,
                    password,
                    first_name,
                    last_name,
                })
                .await?;
            print_json(&response.user.map(user_from_proto))
        }
        Commands::Update {
            id,
            first_name,
            last_name,
        } => {
            let response = client
                .update_user(UpdateUserRequest {
                    id,
                    first_name,
                    last_name,
                })
                .await?;
            print_json(&response.user.map(user_from_proto))
        }
        Commands::Delete {
            id,
            actor_id,
            actor_role,
        } => {
            let response = client
                .delete_user(DeleteUserRequest {
                    id,
                    actor_id,
                    actor_role: role_to_proto(&actor_role.into()),
                })
                .await?;
            print_json(&StatusOutput {
                success: response.success,
            })
        }
        Commands::Login { email, password } => {
            let response = client.login(LoginRequest { email, password }).await?;
            print_json(&LoginOutput {
                token: response.token,
                user: response.user.map(user_from_proto),
            })
        }
        Commands::SetRole {
            id,
            role,
            actor_role,
        } => {
            client
                .update_user_role(UpdateUserRoleRequest {
                    id,
                    role: role_to_proto(&role.into()),
                    actor_role: role_to_proto(&actor_role.into()),
                })
                .await?;
            print_json(&StatusOutput { success: true })
        }
        Commands::SetPassword {
            id,
            current_password,
            new_password,
        } => {
            client
                .update_password(UpdatePasswordRequest {
                    id,
                    current_password,
                    new_password,
                })
                .await?;
            print_json(&StatusOutput { success: true })
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(addr) = cli.addr {
        config.address = addr;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let mut client = match UserServiceClient::connect(Some(config)).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&client, cli.command).await;
    client.close();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
