//! Builder School CLI and web server (`bschool`).
//!
//! Entry point: parses arguments, sets up tracing, loads configuration, and
//! dispatches to the chosen front end.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;
use secrecy::SecretString;

use builderschool_infra::config::resolve_app_config;
use builderschool_observe::tracing_setup::{init_tracing, shutdown_tracing};
use builderschool_types::config::AppConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,builderschool=debug",
        _ => "trace",
    };

    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "bschool", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = resolve_app_config(cli.config.as_deref()).await;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    let explicit_key = cli.api_key.clone().map(SecretString::from);

    let result = run(cli, config, explicit_key).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    mut config: AppConfig,
    explicit_key: Option<SecretString>,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::init(config, explicit_key);
            if !state.has_credentials().await {
                println!(
                    "  {} No API key found. Set {} or pass --api-key; wizard actions will fail until then.",
                    console::style("!").yellow().bold(),
                    console::style(&state.config.api_key_env).cyan()
                );
            }

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;

            println!(
                "  {} Builder School listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Wizard => {
            cli::wizard::run_wizard(&config, explicit_key).await?;
        }

        Commands::Config => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!();
                println!("  {:<10} {}", console::style("provider").bold(), config.provider_name);
                println!("  {:<10} {}", console::style("base_url").bold(), config.base_url);
                println!("  {:<10} {}", console::style("model").bold(), config.model);
                println!("  {:<10} {}", console::style("key env").bold(), config.api_key_env);
                println!(
                    "  {:<10} {}:{}",
                    console::style("server").bold(),
                    config.server.host,
                    config.server.port
                );
                println!();
            }
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

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
}
