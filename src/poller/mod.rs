//! Periodically pulled status sources
//!
//! Each poller owns the writer of exactly one record. A refresh either
//! replaces the snapshot with a complete new one or, on any failure, logs
//! and leaves the previous snapshot in place. The next tick is the retry.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod errors;
pub mod steam;
pub mod updown;
pub mod valorant;

pub use errors::FetchError;

#[async_trait]
pub trait Poller: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch once and update the owned record on success
    async fn refresh(&self);
}

/// Runs every poller once, in order
pub async fn refresh_all(pollers: &[Box<dyn Poller>]) {
    for poller in pollers {
        poller.refresh().await;
        tracing::debug!("{} updated", poller.name());
    }
}

/// Outbound GET returning a parsed JSON body
///
/// ureq is blocking, so the call runs on the blocking pool and only stalls
/// the poller awaiting it.
pub(crate) async fn get_json<R>(
    url: String,
    authorization: Option<String>,
    timeout: Duration,
) -> Result<R, FetchError>
where
    R: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut request = ureq::get(&url).timeout(timeout);
        if let Some(key) = authorization.as_deref() {
            request = request.set("Authorization", key);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(FetchError::Status { code, body });
            }
            Err(ureq::Error::Transport(e)) => return Err(FetchError::Transport(e.to_string())),
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if status != 200 {
            return Err(FetchError::Status { code: status, body });
        }

        Ok(serde_json::from_str(&body)?)
    })
    .await
    .map_err(|e| FetchError::Transport(e.to_string()))?
}
