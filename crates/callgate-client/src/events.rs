//! Long-poll loop shared by the peer and media connection event endpoints.
//!
//! The gateway holds an events request open until something happens and
//! answers 408 when nothing did. [`EventPoll`] keeps asking until the event
//! it waits for shows up, a request fails, or the caller cancels.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use callgate_common::EVENT_ERROR;

use crate::error::{Error, Result};
use crate::transport::{decode_json, Transport};

/// Status the gateway returns when no event arrived within its poll window.
pub const NO_EVENT_STATUS: u16 = 408;

/// Poll `path` until an event named `expected` is returned.
#[derive(Debug, Clone)]
pub struct EventPoll {
    path: String,
    no_event_status: u16,
    expected: String,
}

impl EventPoll {
    pub fn new(path: impl Into<String>, no_event_status: u16, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            no_event_status,
            expected: expected.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Runs the loop and returns the matching event decoded as `E`.
    ///
    /// Only the `event` field of other events is looked at, so their payloads
    /// may have any shape. A body that is not JSON at all aborts the wait.
    /// There is no iteration cap; only `cancel` bounds the wait. A request in
    /// flight is abandoned as soon as the token fires.
    pub async fn run<E: DeserializeOwned>(
        &self,
        transport: &Transport,
        cancel: &CancellationToken,
    ) -> Result<E> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            debug!(path = %self.path, attempt, "polling for {}", self.expected);

            let resp = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                resp = transport.request(Method::GET, &self.path, None) => resp,
            };

            let resp = match resp {
                Ok(resp) => resp,
                Err(Error::Status(code)) if code == self.no_event_status => continue,
                Err(e) => return Err(e),
            };

            let body: Value = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                body = decode_json::<Value>(resp) => body?,
            };

            let name = event_name(&body);
            if name == self.expected {
                info!(path = %self.path, attempt, "received {} event", self.expected);
                return serde_json::from_value(body).map_err(Error::Decoding);
            }

            if name == EVENT_ERROR {
                warn!(
                    path = %self.path,
                    "gateway reported error: {}",
                    body.get("error_message")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or("(no message)")
                );
            } else {
                debug!(path = %self.path, "ignoring {:?} event", name);
            }
        }
    }
}

/// `event` field of a body, empty when absent or not a string.
fn event_name(body: &Value) -> &str {
    body.get("event").and_then(Value::as_str).unwrap_or("")
}
