use std::sync::Arc;

use anyhow::Context;
use catalog::{router, AppConfig, Catalog};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog", version, about = "Catalog of categories, sellers and items")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog over HTTP
    Serve,
    /// Create the catalog tables
    Migrate {
        /// Drop existing tables first
        #[arg(long)]
        recreate: bool,
    },
    /// Insert sample categories, sellers and items
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let catalog = Catalog::from_config(&config)
        .await
        .context("failed to open the catalog store")?;

    let result = match cli.command {
        Commands::Serve => serve(&config, Arc::new(catalog)).await,
        Commands::Migrate { recreate } => {
            let result = catalog.auto_migrate(recreate).await.map_err(Into::into);
            catalog.close().await;
            result
        }
        Commands::Seed => {
            let result = catalog.seed().await;
            if let Ok(summary) = &result {
                tracing::info!(
                    categories = summary.categories,
                    sellers = summary.sellers,
                    items = summary.items,
                    "seeded catalog"
                );
            }
            catalog.close().await;
            result.map(drop).map_err(Into::into)
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }
    result
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn serve(config: &AppConfig, catalog: Arc<Catalog>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, backend = ?catalog.backend(), "catalog server listening");

    axum::serve(listener, router(catalog.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    catalog.close().await;
    tracing::info!("catalog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
