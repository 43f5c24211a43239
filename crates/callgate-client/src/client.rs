use reqwest::{Method, Response};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use callgate_common::{
    AnswerRequest, AnswerResponse, CallRequest, CallResponse, Constraints, CreateMediaRequest,
    CreateMediaResponse, CreatePeerRequest, CreatePeerResponse, CreateRtcpRequest,
    CreateRtcpResponse, MediaConnectionEvent, MediaRedirect, PeerEvent, EVENT_CALL, EVENT_OPEN,
};

use crate::error::{Error, Result};
use crate::events::{EventPoll, NO_EVENT_STATUS};
use crate::transport::{decode_json, Transport};
use crate::types::{ClientConfig, SocketInfo, TransportConfig};

/// Client for the gateway's REST API.
///
/// Holds no call state: ids and tokens returned by one operation are passed
/// back in by the caller.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    config: ClientConfig,
    transport: Transport,
}

impl GatewayClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport_config(config, TransportConfig::default())
    }

    pub fn with_transport_config(config: ClientConfig, transport: TransportConfig) -> Result<Self> {
        let transport = Transport::new(&config, transport)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Registers `peer_id` on the gateway and returns its token. TURN is always requested.
    pub async fn create_peer(&self, peer_id: &str, domain: &str) -> Result<String> {
        let req = CreatePeerRequest {
            key: self.config.api_key.clone(),
            domain: domain.to_string(),
            turn: true,
            peer_id: peer_id.to_string(),
        };
        let resp = self.transport.send_json(Method::POST, "peers", &req).await?;
        let data: CreatePeerResponse = decode_json(resp).await?;
        info!("created peer {}", peer_id);
        Ok(data.params.token)
    }

    /// Allocates a media socket of the given kind.
    pub async fn create_media(&self, is_video: bool) -> Result<SocketInfo> {
        let req = CreateMediaRequest { is_video };
        let resp = self.transport.send_json(Method::POST, "media", &req).await?;
        let data: CreateMediaResponse = decode_json(resp).await?;
        debug!(
            "media {} at {}:{} (video={})",
            data.media_id, data.ip_v4, data.port, is_video
        );
        Ok(data.into())
    }

    pub async fn create_rtcp(&self) -> Result<SocketInfo> {
        let resp = self
            .transport
            .send_json(Method::POST, "media/rtcp", &CreateRtcpRequest::default())
            .await?;
        let data: CreateRtcpResponse = decode_json(resp).await?;
        debug!("rtcp {} at {}:{}", data.rtcp_id, data.ip_v4, data.port);
        Ok(data.into())
    }

    /// Calls `target_id` and returns the media connection id. Not retried.
    pub async fn call(
        &self,
        token: &str,
        peer_id: &str,
        target_id: &str,
        constraints: &Constraints,
        redirect: &MediaRedirect,
    ) -> Result<String> {
        let req = CallRequest {
            peer_id: peer_id.to_string(),
            token: token.to_string(),
            target_id: target_id.to_string(),
            constraints: constraints.clone(),
            redirect_params: redirect.clone(),
        };
        let resp = self
            .transport
            .send_json(Method::POST, "media/connections", &req)
            .await?;
        let data: CallResponse = decode_json(resp).await?;
        info!(
            "calling {} over media connection {}",
            target_id, data.params.media_connection_id
        );
        Ok(data.params.media_connection_id)
    }

    /// Blocks until a remote peer calls us and returns the media connection id.
    ///
    /// `peer_id` and `token` are placed in the URL as given, without
    /// percent-encoding.
    pub async fn wait_for_call(
        &self,
        peer_id: &str,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let poll = EventPoll::new(
            peer_events_path(peer_id, token),
            NO_EVENT_STATUS,
            EVENT_CALL,
        );
        let event: PeerEvent = poll.run(&self.transport, cancel).await?;
        event
            .call_params
            .map(|p| p.media_connection_id)
            .ok_or_else(|| Error::missing_field("call_params"))
    }

    /// Accepts an incoming call. The ids in the response are only logged.
    pub async fn answer(
        &self,
        media_connection_id: &str,
        constraints: &Constraints,
        redirect: &MediaRedirect,
    ) -> Result<()> {
        let req = AnswerRequest {
            constraints: constraints.clone(),
            redirect_params: redirect.clone(),
        };
        let path = format!("media/connections/{}/answer", media_connection_id);
        let resp = self.transport.send_json(Method::POST, &path, &req).await?;
        let data: AnswerResponse = decode_json(resp).await?;
        debug!(
            "answered {}: video_id={:?} audio_id={:?}",
            media_connection_id, data.params.video_id, data.params.audio_id
        );
        Ok(())
    }

    /// Blocks until the media connection reports `OPEN`.
    pub async fn watch_media_connection(
        &self,
        connection_id: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let poll = EventPoll::new(
            media_connection_events_path(connection_id),
            NO_EVENT_STATUS,
            EVENT_OPEN,
        );
        let _: MediaConnectionEvent = poll.run(&self.transport, cancel).await?;
        Ok(())
    }

    /// Deletes the peer. `peer_id` and `token` are placed in the URL as given,
    /// without percent-encoding.
    pub async fn close_peer(&self, peer_id: &str, token: &str) -> Result<Response> {
        let path = format!("peers/{}?token={}", peer_id, token);
        self.transport.request(Method::DELETE, &path, None).await
    }

    pub async fn close_media_connection(&self, connection_id: &str) -> Result<Response> {
        let path = format!("media/connections/{}", connection_id);
        self.transport.request(Method::DELETE, &path, None).await
    }
}

fn peer_events_path(peer_id: &str, token: &str) -> String {
    format!("peers/{}/events?token={}", peer_id, token)
}

fn media_connection_events_path(connection_id: &str) -> String {
    format!("media/connections/{}/events", connection_id)
}
