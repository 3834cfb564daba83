use std::env;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::{Result, SyncError};

/// Base URL of the Agritec API.
pub const BASE_URL: &str = "https://api.agritecsoft.com";
/// Farm (UFL) code the monitor is scoped to.
pub const FARM_UFL: &str = "F14CCB3B7";
/// Site identifier, used for the output directory and file name.
pub const SITE_ID: &str = "sitio1";
/// Environment variable holding the personal access token.
pub const PAT_VAR: &str = "AGRITEC_PAT";
/// Seconds before the monitor request is abandoned.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

const START_DATE_VAR: &str = "AGRITEC_START_DATE";
const END_DATE_VAR: &str = "AGRITEC_END_DATE";
const KEEP_EMPTY_VAR: &str = "AGRITEC_KEEP_EMPTY";
const DATA_DIR_VAR: &str = "AGRITEC_DATA_DIR";

/// Inclusive date window sent as `startdate`/`enddate` query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Everything one run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the API.
    pub pat: String,
    /// Farm the request and the record filter are scoped to.
    pub farm: String,
    /// Site identifier for the output path.
    pub site: String,
    /// Query window; `None` sends the request without one.
    pub range: Option<DateRange>,
    /// Drop records that carry no date and all-zero counts.
    pub trim_empty: bool,
    /// Root under which `<site>/data/` is created.
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the run configuration from the environment and the constants
    /// above. Fails before any request exists when the credential is unset,
    /// empty, or a date override is malformed.
    pub fn from_env() -> Result<Self> {
        let pat = env::var(PAT_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(SyncError::MissingCredential(PAT_VAR))?;

        // Default window is the current calendar year.
        let year = Utc::now().year();
        let start = override_date(START_DATE_VAR)?.unwrap_or_else(|| format!("{year}-01-01"));
        let end = override_date(END_DATE_VAR)?.unwrap_or_else(|| format!("{year}-12-31"));

        let trim_empty = !env_flag(KEEP_EMPTY_VAR);
        let data_dir = env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            pat,
            farm: FARM_UFL.to_string(),
            site: SITE_ID.to_string(),
            range: Some(DateRange { start, end }),
            trim_empty,
            data_dir,
        })
    }

    /// Where the document lands: `<data_dir>/<site>/data/dailymonitor_<site>.json`.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir
            .join(&self.site)
            .join("data")
            .join(format!("dailymonitor_{}.json", self.site))
    }
}

/// Read an optional `YYYY-MM-DD` override, rejecting anything else.
fn override_date(var: &'static str) -> Result<Option<String>> {
    match env::var(var) {
        Ok(value) => {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| SyncError::InvalidDate {
                var,
                value: value.clone(),
            })?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

/// Truthy switch: set to anything but `0`, `false`, `no`, or blank counts as on.
fn env_flag(var: &str) -> bool {
    match env::var(var) {
        Ok(v) => !matches!(v.trim(), "" | "0" | "false" | "no"),
        Err(_) => false,
    }
}
