//! Relay entry point.
//!
//! Binary name: `relayd`
//!
//! Parses CLI arguments, opens the configured record store, then either
//! serves the WebSocket relay or answers a one-shot directory query.

mod cli;
mod gateway;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,relay_core=debug,relay_infra=debug,relayd=debug",
        _ => "trace",
    };
    let enable_otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    relay_observe::tracing_setup::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "relayd", &mut std::io::stdout());
        return Ok(());
    }

    let force_memory = matches!(cli.command, Commands::Serve { memory: true, .. });
    let state = AppState::init(force_memory).await?;

    match cli.command {
        Commands::Serve { host, port, .. } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, storage = ?state.store.kind(), data_dir = %state.data_dir.display(), "relay listening");

            if !cli.quiet {
                println!(
                    "  {} Relay listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("ws://{addr}/ws")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            relay_observe::tracing_setup::shutdown_tracing();
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Channels => {
            cli::channel::list_channels(&state, cli.json).await?;
        }

        Commands::Members { channel } => {
            cli::channel::list_members(&state, &channel, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
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
}
