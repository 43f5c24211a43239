use std::time::Duration;

use reqwest::{header, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{ClientConfig, TransportConfig};

/// Statuses above this are failures.
const MAX_SUCCESS_STATUS: u16 = 300;

/// Thin wrapper around a pooled `reqwest::Client` bound to one gateway.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    request_delay: Duration,
}

impl Transport {
    pub fn new(config: &ClientConfig, transport: TransportConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(transport.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            request_delay: transport.request_delay,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends one request after the fixed pre-request delay.
    ///
    /// Any status above 300 is reported as [`Error::Status`] and the body is
    /// dropped unread.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        tokio::time::sleep(self.request_delay).await;

        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let resp = req.send().await.map_err(|e| {
            warn!("request {} {} failed: {}", method, url, e);
            Error::Transport(e)
        })?;

        let status = resp.status().as_u16();
        if status > MAX_SUCCESS_STATUS {
            debug!("request {} {} returned status {}", method, url, status);
            return Err(Error::Status(status));
        }
        Ok(resp)
    }

    /// Serializes `body` as JSON and sends it.
    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let body = serde_json::to_vec(body).map_err(Error::Encoding)?;
        self.request(method, path, Some(body)).await
    }
}

/// Reads the whole body and decodes it as JSON.
pub async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Error::Decoding)
}
