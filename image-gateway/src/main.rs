use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use image_gateway::config::{self, validate_config};
use image_gateway::utils::cli::{Args, Command};
use image_gateway::utils::jwt::gen_token;
use image_gateway::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&args.server).await,
        Command::Token { sub, roles } => {
            let lifetime = config::jwt_lifetime_secs().map_err(anyhow::Error::msg)?;
            let token = gen_token(lifetime, &config::jwt_secret(), &sub, &roles)?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn serve(args: &image_gateway::utils::cli::ServerArgs) -> anyhow::Result<()> {
    let config = match validate_config(args) {
        Ok(config) => config,
        Err(validation_errors) => {
            eprintln!("{}", validation_errors.join("\n"));
            std::process::exit(1);
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!(bucket = %config.bucket, storage = ?config.storage_typ, "starting image gateway");
    let state = Arc::new(AppState::from_config(config).await);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
