use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use healthvitals_overlay::{create_router, format_duration, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "healthvitals-overlay", version, about = "Conversation overlay controller")]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/healthvitals-overlay")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP control surface
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print elapsed seconds as MM:SS
    FormatDuration { seconds: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve { bind: None, port: None }) {
        Command::FormatDuration { seconds } => {
            println!("{}", format_duration(seconds));
            Ok(())
        }
        Command::Serve { bind, port } => serve(&cli.config, bind, port).await,
    }
}

async fn serve(config_path: &str, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let cfg = Config::load(config_path)?;

    let bind = bind.unwrap_or(cfg.service.http.bind);
    let port = port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", bind, port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Dashboard route: {}", cfg.overlay.dashboard_path);
    info!(
        "Emergency acknowledgment: {}ms, tick: {}ms",
        cfg.overlay.emergency_ack_ms, cfg.overlay.tick_ms
    );

    let state = AppState::new(cfg.overlay.to_overlay_config());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
