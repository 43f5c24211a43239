//! Shared pieces for callgate: gateway wire protocol, logging, helpers.
//!
//! Both the client library and the CLI depend on this crate.

#![forbid(unsafe_code)]

pub mod helpers;
pub mod protocol;

pub use helpers::{random_peer_id, PEER_ID_LEN};
pub use protocol::*;

/// Initialize tracing with a specific default level.
///
/// `RUST_LOG` takes precedence when set. The HTTP stack is kept at `warn`
/// so request polling does not drown out the call flow.
pub fn init_tracing_with_default(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},hyper=warn,reqwest=warn", default_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
