//! Async HTTP client wrapping reqwest.
//!
//! Not a browser — one GET per call, a freshly randomized User-Agent each
//! time, and bounded automatic retry: throttle/server statuses and transport
//! errors back off exponentially (1s, 2s, 4s) before the call gives up.

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::error::PipelineError;

/// Statuses worth retrying on an idempotent GET.
const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Additional attempts after the first.
const MAX_RETRIES: u32 = 3;

/// Browser identities rotated per request.
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/17.6 Safari/605.1.15",
];

/// HTTP client for the acquisition side of the pipeline.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    fn random_user_agent() -> &'static str {
        USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Retries on {429, 500, 502, 503, 504} and on send errors, up to
    /// [`MAX_RETRIES`] extra attempts. A non-success terminal status, an
    /// unreachable host, or a non-JSON body all map to
    /// [`PipelineError::Transport`].
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, PipelineError> {
        let mut retries = 0u32;

        loop {
            let resp = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, Self::random_user_agent())
                .send()
                .await;

            match resp {
                Ok(r) => {
                    let status = r.status().as_u16();

                    if RETRY_STATUSES.contains(&status) && retries < MAX_RETRIES {
                        retries += 1;
                        let delay = Duration::from_secs(1u64 << (retries - 1));
                        tracing::debug!(url, status, retry = retries, "retrying after backoff");
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if !r.status().is_success() {
                        return Err(PipelineError::Transport(format!("{url}: HTTP {status}")));
                    }

                    return r.json::<serde_json::Value>().await.map_err(|e| {
                        PipelineError::Transport(format!("{url}: invalid JSON body: {e}"))
                    });
                }
                Err(e) => {
                    if retries < MAX_RETRIES {
                        retries += 1;
                        let delay = Duration::from_secs(1u64 << (retries - 1));
                        tracing::debug!(url, retry = retries, "send failed, retrying: {e}");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(PipelineError::Transport(format!("{url}: {e}")));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(10_000);
        // Just verify it doesn't panic
        let _ = client;
    }

    #[test]
    fn user_agent_pool_is_nonempty_and_random_pick_is_valid() {
        let ua = HttpClient::random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
    }
}
