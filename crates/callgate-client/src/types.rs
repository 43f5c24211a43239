use std::time::Duration;

use callgate_common::{CreateMediaResponse, CreateRtcpResponse};

/// Delay inserted before every gateway request.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on a single request round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the gateway lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Host including the scheme, e.g. `http://localhost`
    pub host: String,
    pub port: u16,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            port,
        }
    }

    /// `<host>:<port>`, with no scheme inserted.
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Timing knobs of the HTTP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub request_delay: Duration,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Media or RTCP socket allocated on the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketInfo {
    pub id: String,
    pub ip_v4: String,
    pub port: u16,
    pub ip_v6: Option<String>,
}

impl From<CreateMediaResponse> for SocketInfo {
    fn from(resp: CreateMediaResponse) -> Self {
        Self {
            id: resp.media_id,
            ip_v4: resp.ip_v4,
            port: resp.port,
            ip_v6: resp.ip_v6,
        }
    }
}

impl From<CreateRtcpResponse> for SocketInfo {
    fn from(resp: CreateRtcpResponse) -> Self {
        Self {
            id: resp.rtcp_id,
            ip_v4: resp.ip_v4,
            port: resp.port,
            ip_v6: resp.ip_v6,
        }
    }
}
