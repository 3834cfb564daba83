use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the pipeline.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Everything that can abort a sync run.
///
/// Configuration problems surface before any request is built, and network
/// or parse problems surface before anything is written, so a failed run
/// never replaces the previous output file.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The credential variable is unset or empty.
    #[error("{0} is not set; export the Agritec personal access token before running")]
    MissingCredential(&'static str),

    /// A date override is not a calendar date.
    #[error("{var} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { var: &'static str, value: String },

    /// Building the request URL failed.
    #[error("invalid request URL")]
    Url(#[from] url::ParseError),

    /// Connect failure, timeout, or non-2xx status from the monitor endpoint.
    #[error("GET {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not parseable as tab-separated text.
    #[error("malformed monitor response")]
    Tsv(#[from] csv::Error),

    /// A count cell is neither empty nor an integer.
    #[error("line {line}: {column} value {value:?} is not an integer")]
    Count {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Serializing the simplified records failed.
    #[error("serializing output document")]
    Json(#[from] serde_json::Error),

    /// Creating directories or writing the output file failed.
    #[error("writing {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
