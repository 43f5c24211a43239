//! callgate: sample caller and callee driving a WebRTC gateway over HTTP.

#![forbid(unsafe_code)]

mod flow;
#[cfg(test)]
mod test_gateway;

use anyhow::Result;
use callgate_client::{ClientConfig, GatewayClient};
use callgate_common::{random_peer_id, PEER_ID_LEN};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "callgate")]
#[command(about = "Drive a WebRTC gateway through a sample call")]
struct Args {
    #[command(flatten)]
    gateway: GatewayArgs,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct GatewayArgs {
    /// API key registered with the gateway
    #[arg(long, env = "APIKEY", hide_env_values = true)]
    api_key: String,

    /// Local peer id; a random one is generated when omitted
    #[arg(long, env = "PEER_ID")]
    peer_id: Option<String>,

    /// Gateway host including the scheme, e.g. http://localhost
    #[arg(long, env = "DOMAIN")]
    gateway_host: String,

    /// Gateway REST port
    #[arg(long, env = "PORT")]
    gateway_port: u16,

    /// Domain registered together with the peer
    #[arg(long, env = "CALLGATE_PEER_DOMAIN", default_value = "localhost")]
    domain: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Call a remote peer and hold the connection until Ctrl-C
    Caller {
        /// Peer id to call
        #[arg(long, env = "TARGET_PEER_ID")]
        target_peer_id: String,
    },

    /// Wait for an incoming call, answer it and hold it until Ctrl-C
    Callee,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    callgate_common::init_tracing_with_default(&args.log_level);

    let gateway = args.gateway;
    let peer_id = gateway
        .peer_id
        .unwrap_or_else(|| random_peer_id(PEER_ID_LEN));
    info!("peer id: {}", peer_id);

    let client = GatewayClient::new(ClientConfig::new(
        gateway.api_key,
        gateway.gateway_host,
        gateway.gateway_port,
    ))?;

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received, shutting down");
                    shutdown.cancel();
                }
                Err(e) => warn!("failed to listen for interrupt: {}", e),
            }
        });
    }

    match args.command {
        Command::Caller { target_peer_id } => {
            flow::run_caller(&client, &peer_id, &gateway.domain, &target_peer_id, &shutdown).await
        }
        Command::Callee => flow::run_callee(&client, &peer_id, &gateway.domain, &shutdown).await,
    }
}
