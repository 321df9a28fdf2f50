use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use realestate_api::auth::{generate_jwt, hash_password, Claims, UserDirectory};
use realestate_api::config::{self, AppConfig};
use realestate_api::state::AppState;

#[derive(Parser)]
#[command(name = "realestate-api")]
#[command(about = "Real estate and demographic data API with an electricity usage proxy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Print the password hash stored in the user directory")]
    HashPassword {
        #[arg(help = "Plain-text password")]
        password: String,
    },

    #[command(about = "Mint a bearer token for a user in the directory")]
    Token {
        #[arg(help = "Username")]
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATA_PATH, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = config::config().clone();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(config, port).await,
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password));
            Ok(())
        }
        Commands::Token { username } => {
            let users = UserDirectory::load(&config.storage.users_path).await?;
            let user = users
                .get(&username)
                .with_context(|| format!("user '{}' not found in {}", username, config.storage.users_path.display()))?;
            let claims = Claims::new(user, config.security.jwt_expiry_hours);
            println!("{}", generate_jwt(&claims, &config.security)?);
            Ok(())
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!("Starting Real Estate API in {:?} mode", config.environment);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::load(config).await?;
    let app = realestate_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
