use crate::libs::config::Config;
use crate::libs::messages::macros::route_to_tracing;
use crate::server;
use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind, overriding configuration
    #[arg(long)]
    host: Option<String>,
    /// Port to bind, overriding configuration
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    init_tracing();

    let config = Config::load()?;
    let mut server_config = config.server();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    server::serve(server_config, config.certificate()).await
}

/// `info` by default, `RUST_LOG` wins when set.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    route_to_tracing();
}
