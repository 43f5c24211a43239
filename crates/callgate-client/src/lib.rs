pub mod client;
pub mod error;
pub mod events;
pub mod transport;
pub mod types;

pub use client::GatewayClient;
pub use error::{Error, Result};
pub use events::{EventPoll, NO_EVENT_STATUS};
pub use transport::Transport;
pub use types::{
    ClientConfig, SocketInfo, TransportConfig, DEFAULT_REQUEST_DELAY, DEFAULT_REQUEST_TIMEOUT,
};

pub use tokio_util::sync::CancellationToken;
