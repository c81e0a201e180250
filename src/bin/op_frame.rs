//! OP delegation frame server
//!
//! Serves the approve-and-delegate screens over HTTP for frame clients.

use std::path::PathBuf;

use clap::Parser;
use op_delegation_frame::{logging::LogLevel, serve, setup_logging, FrameConfig};

#[derive(Parser)]
#[command(name = "op-frame")]
#[command(about = "Frame server for approving and delegating OP")]
#[command(version)]
struct Args {
    /// Path to a TOML/JSON/YAML configuration file
    /// (defaults to op-delegation-frame/config.toml in the user config dir, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind the HTTP server to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", FrameConfig::generate_example_config()?);
        return Ok(());
    }

    let config_path = FrameConfig::resolve_path(args.config);
    let mut config = FrameConfig::from_env(config_path.as_deref())?;

    if args.debug {
        config.logging.level = LogLevel::Debug;
        config.logging.custom_filter = None;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    setup_logging(&config.logging)?;
    config.validate()?;

    tracing::info!(
        "Starting {} on {} (token {}, delegate {})",
        config.title,
        config.chain.chain_id,
        config.contracts.token,
        config.contracts.delegate
    );

    serve(config).await
}
