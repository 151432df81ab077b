//! Punchcard CLI and REST API entry point.
//!
//! Binary name: `punchcard`
//!
//! Parses CLI arguments, loads configuration, initializes tracing, the
//! database and the list service, then dispatches to the command handler or
//! starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use punchcard_infra::config::load_config;
use punchcard_infra::filesystem::resolve_data_dir;
use punchcard_observe::tracing_setup::{
    init_tracing, shutdown_tracing, verbosity_directive, LogFormat,
};
use punchcard_types::query::QueryParams;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await;

    init_tracing(
        LogFormat::from_json_flag(config.logging.json),
        config.logging.otel,
        verbosity_directive(cli.verbose),
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, AppState::init(data_dir, config).await?).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "API server listening");
            println!(
                "  {} Punchcard API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}/api")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Types => {
            cli::content::list_types(&state, cli.json).await?;
        }

        Commands::List {
            type_slug,
            sort,
            sort_dir,
            page,
            per_page,
        } => {
            let params = QueryParams {
                sort,
                sort_dir,
                page,
                per_page,
            };
            cli::content::list_content(&state, &type_slug, params, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::content::show_content(&state, &id, cli.json).await?;
        }

        Commands::Import { file } => {
            cli::content::import_content(&state, &file, cli.json).await?;
        }

        Commands::Purge { type_slug, force } => {
            cli::content::purge_content(&state, &type_slug, force, cli.json).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
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
                tracing::error!("failed to install SIGTERM handler: {e}");
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

    tracing::info!("shutdown signal received");
}
