//! JSON bodies exchanged with the WebRTC gateway.
//!
//! Field names follow the gateway's REST API verbatim, including its mix of
//! snake_case and camelCase.

use serde::{Deserialize, Serialize};

/// Peer event emitted when a remote peer calls us.
pub const EVENT_CALL: &str = "CALL";

/// Media connection event emitted once media is flowing.
pub const EVENT_OPEN: &str = "OPEN";

/// Event reported by the gateway when something went wrong on its side.
pub const EVENT_ERROR: &str = "ERROR";

/// POST /peers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreatePeerRequest {
    pub key: String,
    pub domain: String,
    pub turn: bool,
    pub peer_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreatePeerResponse {
    #[serde(default)]
    pub command_type: String,
    pub params: PeerInfo,
}

/// Pair of peer id and the token that authorises it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    #[serde(default)]
    pub peer_id: String,
    pub token: String,
}

/// POST /media
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CreateMediaRequest {
    pub is_video: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateMediaResponse {
    pub media_id: String,
    pub port: u16,
    pub ip_v4: String,
    #[serde(default)]
    pub ip_v6: Option<String>,
}

/// POST /media/rtcp, serialized as an empty object.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateRtcpRequest {}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateRtcpResponse {
    pub rtcp_id: String,
    pub port: u16,
    pub ip_v4: String,
    #[serde(default)]
    pub ip_v6: Option<String>,
}

/// Codec settings for one media kind.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MediaParams {
    pub band_width: i32,
    pub codec: String,
    pub media_id: String,
    pub rtcp_id: String,
    pub payload_type: i32,
}

/// Media constraints sent verbatim with call and answer requests.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub video: bool,
    #[serde(rename = "videoReceiveEnabled")]
    pub video_receive_enabled: bool,
    pub audio: bool,
    #[serde(rename = "audioReceiveEnabled")]
    pub audio_receive_enabled: bool,
    pub video_params: MediaParams,
    pub audio_params: MediaParams,
}

/// Local address the gateway forwards decoded packets to.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RedirectEndpoint {
    pub ip_v4: String,
    pub port: u16,
}

impl RedirectEndpoint {
    pub fn new(ip_v4: impl Into<String>, port: u16) -> Self {
        Self {
            ip_v4: ip_v4.into(),
            port,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MediaRedirect {
    pub video: RedirectEndpoint,
    pub audio: RedirectEndpoint,
    pub video_rtcp: RedirectEndpoint,
    pub audio_rtcp: RedirectEndpoint,
}

/// POST /media/connections
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub peer_id: String,
    pub token: String,
    pub target_id: String,
    pub constraints: Constraints,
    pub redirect_params: MediaRedirect,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CallResponse {
    #[serde(default)]
    pub command_type: String,
    pub params: CallParams,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CallParams {
    pub media_connection_id: String,
}

/// POST /media/connections/{id}/answer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub constraints: Constraints,
    pub redirect_params: MediaRedirect,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AnswerResponse {
    #[serde(default)]
    pub command_type: String,
    #[serde(default)]
    pub params: AnswerParams,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AnswerParams {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub audio_id: Option<String>,
}

/// GET /peers/{peer_id}/events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerEvent {
    pub event: String,
    #[serde(default)]
    pub params: Option<PeerEventParams>,
    #[serde(default)]
    pub call_params: Option<CallParams>,
    #[serde(default)]
    pub data_params: Option<DataParams>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Peer identity echoed in peer events; either half may be left out.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PeerEventParams {
    #[serde(default)]
    pub peer_id: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DataParams {
    #[serde(default)]
    pub data_connection_id: String,
}

/// GET /media/connections/{id}/events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MediaConnectionEvent {
    pub event: String,
    #[serde(default)]
    pub stream_options: Option<StreamOptions>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub stream_params: StreamParams,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StreamParams {
    #[serde(default)]
    pub media_id: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub ip_v4: String,
    #[serde(default)]
    pub ip_v6: Option<String>,
}
