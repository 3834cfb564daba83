// src/process/mod.rs
use csv::ReaderBuilder;

use crate::error::Result;

pub mod simplify;

pub use simplify::{simplify_records, DailyRecord};

/// One parsed monitor response: the header line plus every data row, in
/// source order. Rows may be shorter than the header; lookups downstream
/// treat the missing trailing cells as absent values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of `name` in the header line, if that column exists.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Parse a monitor response body as tab-separated text with a header line.
///
/// Standard quoting rules apply and per-row field counts may vary. A body
/// with no content at all yields an empty table rather than an error.
pub fn parse_tsv(body: &str) -> Result<RawTable> {
    // Some exports lead with a byte-order mark; never let it fuse into the
    // first column name.
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    if body.trim().is_empty() {
        return Ok(RawTable::default());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,agrisync::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn parses_headers_and_rows_in_order() {
        init_test_logging();
        let body = "DATE\tSERVICES\tBIRTHINGS\tNWEANED\n\
                    2025-01-06\t12\t9\t102\n\
                    2025-01-13\t10\t11\t98\n";
        let table = parse_tsv(body).unwrap();
        assert_eq!(table.headers, ["DATE", "SERVICES", "BIRTHINGS", "NWEANED"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], ["2025-01-06", "12", "9", "102"]);
        assert_eq!(table.rows[1], ["2025-01-13", "10", "11", "98"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let body = "DATE\tSERVICES\r\n2025-01-06\t12\r\n";
        let table = parse_tsv(body).unwrap();
        assert_eq!(table.rows, vec![vec!["2025-01-06", "12"]]);
    }

    #[test]
    fn quoted_cells_may_contain_tabs() {
        let body = "DATE\tNOTE\n2025-01-06\t\"before\tafter\"\n";
        let table = parse_tsv(body).unwrap();
        assert_eq!(table.rows[0][1], "before\tafter");
    }

    #[test]
    fn short_rows_are_kept_short() {
        let body = "DATE\tSERVICES\tBIRTHINGS\n2025-01-06\n";
        let table = parse_tsv(body).unwrap();
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0], vec!["2025-01-06"]);
    }

    #[test]
    fn empty_body_yields_empty_table() {
        for body in ["", "   \n  \n"] {
            let table = parse_tsv(body).unwrap();
            assert!(table.headers.is_empty());
            assert!(table.rows.is_empty());
        }
    }

    #[test]
    fn header_only_body_yields_no_rows() {
        let table = parse_tsv("DATE\tSERVICES\n").unwrap();
        assert_eq!(table.headers, ["DATE", "SERVICES"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let table = parse_tsv("\u{feff}DATE\tSERVICES\n2025-01-06\t1\n").unwrap();
        assert_eq!(table.column("DATE"), Some(0));
    }
}
