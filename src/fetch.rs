// src/fetch.rs

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{Config, BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::error::{Result, SyncError};

/// Monitor endpoint for the configured farm, with the optional date window
/// appended as `startdate`/`enddate` query parameters.
pub fn monitor_url(config: &Config) -> Result<Url> {
    let mut url = Url::parse(BASE_URL)?.join(&format!("farms/{}/dailymonitor", config.farm))?;
    if let Some(range) = &config.range {
        url.query_pairs_mut()
            .append_pair("startdate", &range.start)
            .append_pair("enddate", &range.end);
    }
    Ok(url)
}

/// Fetch the raw daily-monitor body for the configured farm.
///
/// One bearer-authenticated GET with a fixed timeout; a connect failure,
/// timeout, or non-2xx status aborts the run. There is no retry.
#[instrument(level = "info", skip(config), fields(farm = %config.farm))]
pub async fn daily_monitor(config: &Config) -> Result<String> {
    let url = monitor_url(config)?;
    let http_err = |source: reqwest::Error| SyncError::Http {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(http_err)?;

    debug!(%url, "requesting daily monitor");
    let response = client
        .get(url.clone())
        .bearer_auth(&config.pat)
        .send()
        .await
        .map_err(http_err)?
        .error_for_status()
        .map_err(http_err)?;

    let body = response.text().await.map_err(http_err)?;
    debug!(bytes = body.len(), "received daily monitor");
    Ok(body)
}
