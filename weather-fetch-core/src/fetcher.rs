use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    model::{FetchError, FetchResult, RequestParameters},
    ui::UiHandle,
};

pub mod decode;

pub use decode::decode_summary;

/// Issues weather queries and hands the outcome to a presentation thread.
///
/// Holds one pooled HTTP client; no per-request state is kept between calls,
/// so a single fetcher can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    http: Client,
}

impl Default for WeatherFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherFetcher {
    /// Fetcher with the transport's default timeouts.
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Start a fetch in the background and deliver its result through `ui`.
    ///
    /// Returns immediately. `on_result` runs exactly once, on whichever thread
    /// dispatches the [`UiQueue`](crate::ui::UiQueue) behind `ui`. Must be
    /// called from within a Tokio runtime.
    pub fn fetch<S, F>(
        &self,
        params: RequestParameters,
        ui: &UiHandle<S>,
        on_result: F,
    ) -> JoinHandle<()>
    where
        S: 'static,
        F: FnOnce(&mut S, FetchResult) + Send + 'static,
    {
        let fetcher = self.clone();
        let ui = ui.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch_summary(&params).await;
            ui.run_on_ui_thread(move |state| on_result(state, result));
        })
    }

    /// Run the whole request/decode pipeline and return its outcome.
    pub async fn fetch_summary(&self, params: &RequestParameters) -> FetchResult {
        if params.api_key.is_empty() {
            tracing::warn!("API key is empty; the server will most likely reject the request");
        }

        let url = params.request_url()?;
        tracing::debug!(
            base_url = %params.base_url,
            lat = params.latitude,
            lon = params.longitude,
            "sending weather request"
        );

        // A failed send drops the in-flight request; nothing is retried.
        let res = self.http.get(url).send().await.map_err(|e| {
            FetchError::transport(format!(
                "Failed to send weather request: {}",
                error_chain(&e)
            ))
        })?;

        let status = res.status();

        // `text()` consumes the response, releasing it on every path below.
        let body = res.text().await.map_err(|e| {
            FetchError::transport(format!(
                "Failed to read weather response body: {}",
                error_chain(&e)
            ))
        })?;

        tracing::debug!(%status, body = %body, "weather response received");

        decode_summary(&body).map_err(|err| {
            if status.is_success() {
                return err;
            }

            let server = decode::server_message(&body)
                .unwrap_or_else(|| truncate_body(&body));
            FetchError::malformed(format!("HTTP {status}: {server} ({})", err.detail()))
        })
    }
}

/// `reqwest` errors keep the useful part (e.g. "Connection refused") in their sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
