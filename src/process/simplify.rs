// src/process/simplify.rs
//
// Reduces the wide monitor table to the handful of fields the dashboards
// plot: the period date plus services, birthings, and weaned-piglet counts.
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::RawTable;
use crate::error::{Result, SyncError};

/// Date column candidates, most specific first. The first name present in
/// the header wins, even when a row's cell under it is empty; resolution is
/// by column, never per value.
pub const DATE_COLUMNS: [&str; 4] = ["DATE", "WEEKDATE", "WEEKENDDATE", "WEEK"];

/// Farm-identifier column candidates. Per record, the first candidate with a
/// non-empty value identifies the farm.
pub const FARM_COLUMNS: [&str; 3] = ["FARMUFL", "UFL", "FARMID"];

const SERVICES: &str = "SERVICES";
const BIRTHINGS: &str = "BIRTHINGS";
const NWEANED: &str = "NWEANED";

/// The reduced record shape the dashboards consume. Field order here is the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: Option<String>,
    pub services: i64,
    pub birthings: i64,
    pub nweaned: i64,
}

impl DailyRecord {
    fn counts_are_zero(&self) -> bool {
        self.services == 0 && self.birthings == 0 && self.nweaned == 0
    }
}

/// First date candidate present in the header line.
pub fn resolve_date_column(headers: &[String]) -> Option<usize> {
    DATE_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
}

/// Cell lookup that treats a short row as missing its trailing cells.
fn cell<'a>(row: &'a [String], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| row.get(i)).map(String::as_str)
}

/// Tolerant count coercion: a missing cell or the empty string is 0, and
/// anything else must parse as an integer after trimming the surrounding
/// whitespace. A blank-but-not-empty cell does not parse.
fn coerce_count(value: Option<&str>, line: usize, column: &'static str) -> Result<i64> {
    match value {
        None | Some("") => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| SyncError::Count {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Per-record farm code: the first farm candidate column holding a non-empty
/// value, raw.
fn record_farm<'a>(row: &'a [String], farm_idxs: &[Option<usize>]) -> Option<&'a str> {
    farm_idxs
        .iter()
        .filter_map(|idx| cell(row, *idx))
        .find(|v| !v.is_empty())
}

/// Map raw rows to `DailyRecord`s in source order, keeping only rows for
/// `farm` and, when `trim_empty` is set, dropping rows that resolved no date
/// and carry all-zero counts. Nothing is deduplicated or reordered.
pub fn simplify_records(table: &RawTable, farm: &str, trim_empty: bool) -> Result<Vec<DailyRecord>> {
    let date_idx = resolve_date_column(&table.headers);
    let farm_idxs: Vec<Option<usize>> = FARM_COLUMNS.iter().map(|c| table.column(c)).collect();
    if farm_idxs.iter().all(Option::is_none) && !table.headers.is_empty() {
        warn!(farm, "no farm column in the response; keeping every row");
    }

    let services_idx = table.column(SERVICES);
    let birthings_idx = table.column(BIRTHINGS);
    let nweaned_idx = table.column(NWEANED);

    let mut records = Vec::with_capacity(table.rows.len());
    for (n, row) in table.rows.iter().enumerate() {
        // Header is line 1.
        let line = n + 2;
        if let Some(code) = record_farm(row, &farm_idxs) {
            if code != farm {
                debug!(line, code, "skipping row for another farm");
                continue;
            }
        }

        let record = DailyRecord {
            date: cell(row, date_idx).map(str::to_string),
            services: coerce_count(cell(row, services_idx), line, SERVICES)?,
            birthings: coerce_count(cell(row, birthings_idx), line, BIRTHINGS)?,
            nweaned: coerce_count(cell(row, nweaned_idx), line, NWEANED)?,
        };

        if trim_empty && record.date.is_none() && record.counts_are_zero() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}
