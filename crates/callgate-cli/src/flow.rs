//! Scripted caller and callee flows.

use anyhow::{Context, Result};
use callgate_client::{GatewayClient, SocketInfo};
use callgate_common::{Constraints, MediaParams, MediaRedirect, RedirectEndpoint};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const VIDEO_CODEC: &str = "H264";
const VIDEO_PAYLOAD_TYPE: i32 = 100;
const AUDIO_CODEC: &str = "opus";
const AUDIO_PAYLOAD_TYPE: i32 = 111;
const BAND_WIDTH: i32 = 1500;

const REDIRECT_IP: &str = "127.0.0.1";
const VIDEO_PORT: u16 = 20000;
const AUDIO_PORT: u16 = 20001;
const VIDEO_RTCP_PORT: u16 = 20010;
const AUDIO_RTCP_PORT: u16 = 20011;

/// Sockets allocated on the gateway for one call.
#[derive(Debug, Clone)]
pub struct MediaSockets {
    pub video: SocketInfo,
    pub audio: SocketInfo,
    pub video_rtcp: SocketInfo,
    pub audio_rtcp: SocketInfo,
}

/// A registered peer together with what it needs to call or answer.
#[derive(Debug, Clone)]
pub struct Session {
    pub peer_id: String,
    pub token: String,
    pub constraints: Constraints,
    pub redirect: MediaRedirect,
}

pub fn constraints_for(sockets: &MediaSockets) -> Constraints {
    Constraints {
        video: true,
        video_receive_enabled: true,
        audio: true,
        audio_receive_enabled: true,
        video_params: MediaParams {
            band_width: BAND_WIDTH,
            codec: VIDEO_CODEC.to_string(),
            media_id: sockets.video.id.clone(),
            rtcp_id: sockets.video_rtcp.id.clone(),
            payload_type: VIDEO_PAYLOAD_TYPE,
        },
        audio_params: MediaParams {
            band_width: BAND_WIDTH,
            codec: AUDIO_CODEC.to_string(),
            media_id: sockets.audio.id.clone(),
            rtcp_id: sockets.audio_rtcp.id.clone(),
            payload_type: AUDIO_PAYLOAD_TYPE,
        },
    }
}

pub fn loopback_redirect() -> MediaRedirect {
    MediaRedirect {
        video: RedirectEndpoint::new(REDIRECT_IP, VIDEO_PORT),
        audio: RedirectEndpoint::new(REDIRECT_IP, AUDIO_PORT),
        video_rtcp: RedirectEndpoint::new(REDIRECT_IP, VIDEO_RTCP_PORT),
        audio_rtcp: RedirectEndpoint::new(REDIRECT_IP, AUDIO_RTCP_PORT),
    }
}

async fn allocate_sockets(client: &GatewayClient) -> Result<MediaSockets> {
    let video = client.create_media(true).await.context("create video media")?;
    info!("video media {} on port {}", video.id, video.port);
    let audio = client.create_media(false).await.context("create audio media")?;
    info!("audio media {} on port {}", audio.id, audio.port);
    let video_rtcp = client.create_rtcp().await.context("create video rtcp")?;
    let audio_rtcp = client.create_rtcp().await.context("create audio rtcp")?;
    info!("rtcp sockets {} / {}", video_rtcp.id, audio_rtcp.id);

    Ok(MediaSockets {
        video,
        audio,
        video_rtcp,
        audio_rtcp,
    })
}

/// Registers the peer and allocates its media. The peer is closed again if
/// allocation fails.
pub async fn open_session(client: &GatewayClient, peer_id: &str, domain: &str) -> Result<Session> {
    let token = client
        .create_peer(peer_id, domain)
        .await
        .context("create peer")?;

    let sockets = match allocate_sockets(client).await {
        Ok(sockets) => sockets,
        Err(e) => {
            close_peer(client, peer_id, &token).await;
            return Err(e);
        }
    };

    Ok(Session {
        peer_id: peer_id.to_string(),
        token,
        constraints: constraints_for(&sockets),
        redirect: loopback_redirect(),
    })
}

pub async fn run_caller(
    client: &GatewayClient,
    peer_id: &str,
    domain: &str,
    target_peer_id: &str,
    shutdown: &CancellationToken,
) -> Result<()> {
    let session = open_session(client, peer_id, domain).await?;

    let connection_id = match client
        .call(
            &session.token,
            &session.peer_id,
            target_peer_id,
            &session.constraints,
            &session.redirect,
        )
        .await
    {
        Ok(id) => id,
        Err(e) => {
            teardown(client, &session, None).await;
            return Err(e).context(format!("call {}", target_peer_id));
        }
    };
    info!("media connection id: {}", connection_id);

    let outcome = client.watch_media_connection(&connection_id, shutdown).await;
    let result = hold(outcome, shutdown, "media connection open").await;
    teardown(client, &session, Some(&connection_id)).await;
    result.context("watch media connection")
}

pub async fn run_callee(
    client: &GatewayClient,
    peer_id: &str,
    domain: &str,
    shutdown: &CancellationToken,
) -> Result<()> {
    let session = open_session(client, peer_id, domain).await?;
    info!("waiting for a call to {}", session.peer_id);

    let connection_id = match client
        .wait_for_call(&session.peer_id, &session.token, shutdown)
        .await
    {
        Ok(id) => id,
        Err(e) if e.is_cancelled() => {
            info!("stopped waiting for a call");
            teardown(client, &session, None).await;
            return Ok(());
        }
        Err(e) => {
            teardown(client, &session, None).await;
            return Err(e).context("wait for call");
        }
    };
    info!("incoming media connection {}", connection_id);

    let outcome = client
        .answer(&connection_id, &session.constraints, &session.redirect)
        .await;
    let result = hold(outcome, shutdown, "call answered").await;
    teardown(client, &session, Some(&connection_id)).await;
    result.context("answer call")
}

/// On success waits for shutdown; a cancellation is not an error.
async fn hold(
    outcome: callgate_client::Result<()>,
    shutdown: &CancellationToken,
    what: &str,
) -> callgate_client::Result<()> {
    match outcome {
        Ok(()) => {
            info!("{}, listening until Ctrl-C", what);
            shutdown.cancelled().await;
            Ok(())
        }
        Err(e) if e.is_cancelled() => {
            info!("interrupted before {}", what);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn teardown(client: &GatewayClient, session: &Session, connection_id: Option<&str>) {
    if let Some(id) = connection_id {
        match client.close_media_connection(id).await {
            Ok(resp) => info!("closed media connection {} ({})", id, resp.status()),
            Err(e) => warn!("failed to close media connection {}: {}", id, e),
        }
    }
    close_peer(client, &session.peer_id, &session.token).await;
}

async fn close_peer(client: &GatewayClient, peer_id: &str, token: &str) {
    match client.close_peer(peer_id, token).await {
        Ok(resp) => info!("closed peer {} ({})", peer_id, resp.status()),
        Err(e) => warn!("failed to close peer {}: {}", peer_id, e),
    }
}
