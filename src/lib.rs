//! Syncs the Agritec daily monitor for one farm site into the JSON document
//! the static dashboards read.
//!
//! One run is one pipeline pass over live data: fetch the tab-separated
//! monitor response, reduce it to the date and breeding counts, and replace
//! the site's data file.

pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod store;

pub use config::Config;
pub use error::{Result, SyncError};
pub use process::DailyRecord;

use tracing::{debug, info, warn};

/// Run the fetch → simplify → persist pipeline once.
///
/// The stages are strictly sequential: the request must succeed before the
/// body is parsed, and parsing before anything is written, so a failed run
/// leaves the previous output untouched.
pub async fn run(config: &Config) -> Result<()> {
    let body = fetch::daily_monitor(config).await?;

    let table = process::parse_tsv(&body)?;
    info!(rows = table.rows.len(), "parsed monitor response");
    debug!(columns = ?table.headers, "response columns");
    if table.rows.is_empty() {
        warn!("monitor response carried no rows; writing an empty document");
    }

    let records = process::simplify_records(&table, &config.farm, config.trim_empty)?;
    if let Some(first) = records.first() {
        debug!(sample = ?first, "first simplified record");
    }

    let path = config.output_path();
    store::write_records(&path, &records).await?;
    info!(records = records.len(), path = %path.display(), "monitor snapshot written");

    Ok(())
}
