//! songbook-web - song sharing web service
//!
//! `songbook-web` (or `songbook-web serve`) runs the HTTP server.
//! `songbook-web create-session --name <display name>` issues a session
//! for a user, creating the user on first use, and prints the cookie.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use songbook_common::config::{ConfigOverrides, ServerConfig};
use songbook_common::db::init_database;
use songbook_common::db::users::{self, NewUser};
use songbook_web::session::{self, SESSION_COOKIE};
use songbook_web::{build_router, AppState};
use time::Duration;
use tokio::signal;
use tower_sessions_sqlx_store::SqliteStore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songbook-web
#[derive(Parser, Debug)]
#[command(name = "songbook-web")]
#[command(about = "Song sharing web service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Explicit config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a new session token for a user, creating the user if needed
    CreateSession {
        /// Display name of the user
        #[arg(long)]
        name: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Avatar URL
        #[arg(long)]
        image: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songbook_web=info,songbook_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let overrides = ConfigOverrides {
        host: args.host,
        port: args.port,
        database: args.database,
        config_file: args.config,
    };
    let config = ServerConfig::resolve(&overrides).context("Failed to resolve configuration")?;

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;

    let store = session::open_store(&pool)
        .await
        .context("Failed to open session store")?;
    let lifetime = session::session_lifetime(config.session_ttl_hours)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool, store, lifetime).await,
        Command::CreateSession {
            name,
            first_name,
            last_name,
            image,
        } => {
            let profile = NewUser {
                display_name: name,
                first_name,
                last_name,
                image,
            };
            let user = users::find_or_create_user(&pool, &profile).await?;
            let id = session::issue_session(&store, &user.guid, lifetime).await?;
            info!("Issued session for {} ({})", user.display_name, user.guid);
            println!("{}={}", SESSION_COOKIE, id);
            Ok(())
        }
    }
}

async fn serve(
    config: ServerConfig,
    pool: sqlx::SqlitePool,
    store: SqliteStore,
    lifetime: Duration,
) -> Result<()> {
    info!("Starting songbook-web v{}", env!("CARGO_PKG_VERSION"));

    session::purge_expired(&store).await?;

    let app = build_router(AppState::new(pool), session::session_layer(store, lifetime));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
