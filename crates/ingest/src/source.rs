//! Record source: the single asynchronous fetch of the unified dataset.
//!
//! A load failure here (unreachable resource, non-success status, body that
//! is not a JSON array of rows) is fatal to the whole dashboard and is not
//! retried. Everything downstream of a successful fetch is synchronous.

use std::path::PathBuf;
use std::time::Duration;

use adpulse_core::error::{AdPulseError, AdPulseResult};
use adpulse_core::types::RawRecord;
use tracing::info;

/// Where the unified dataset lives. One resource, fetched exactly once per
/// load; there is no incremental or streaming ingest.
#[derive(Debug, Clone)]
pub enum RecordSource {
    File(PathBuf),
    Http { url: String, timeout: Duration },
}

impl RecordSource {
    /// Pick a source from a location string: `http(s)://` is fetched over
    /// the network, anything else is treated as a file path.
    pub fn from_location(location: &str, timeout_secs: u64) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http {
                url: location.to_string(),
                timeout: Duration::from_secs(timeout_secs),
            }
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Fetch and decode the dataset.
    pub async fn fetch(&self) -> AdPulseResult<Vec<RawRecord>> {
        let records = match self {
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    AdPulseError::Source(format!("failed to read {}: {e}", path.display()))
                })?;
                serde_json::from_slice::<Vec<RawRecord>>(&bytes)?
            }
            Self::Http { url, timeout } => {
                let client = reqwest::Client::builder()
                    .timeout(*timeout)
                    .build()
                    .map_err(|e| AdPulseError::Source(e.to_string()))?;
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| AdPulseError::Source(format!("fetch of {url} failed: {e}")))?;
                if !response.status().is_success() {
                    return Err(AdPulseError::Source(format!(
                        "{url} returned status {}",
                        response.status()
                    )));
                }
                response
                    .json::<Vec<RawRecord>>()
                    .await
                    .map_err(|e| AdPulseError::Source(format!("decoding {url} failed: {e}")))?
            }
        };

        info!(records = records.len(), "dataset fetched");
        Ok(records)
    }
}
