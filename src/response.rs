use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

/// One downloadable file found by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRow {
    /// Start of the day the file covers.
    pub start_time: NaiveDateTime,
    /// Midnight following `start_time`.
    pub end_time: NaiveDateTime,
    pub source: String,
    pub instrument: String,
    pub url: String,
}

impl QueryRow {
    pub(crate) fn for_day(day: NaiveDate, url: String, source: &str, instrument: &str) -> Self {
        let start_time = day.and_time(NaiveTime::MIN);
        Self {
            start_time,
            end_time: start_time + Duration::days(1),
            source: source.to_string(),
            instrument: instrument.to_string(),
            url,
        }
    }
}

/// Search result: rows in day order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResponse {
    pub rows: Vec<QueryRow>,
}

impl QueryResponse {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryRow> {
        self.rows.iter()
    }

    pub fn urls(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.url.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize query response")
    }
}

impl<'a> IntoIterator for &'a QueryResponse {
    type Item = &'a QueryRow;
    type IntoIter = std::slice::Iter<'a, QueryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for QueryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<19}  {:<19}  {:<6}  {}",
            "Start Time", "End Time", "Source", "Instrument"
        )?;
        writeln!(
            f,
            "{}  {}  {}  {}",
            "-".repeat(19),
            "-".repeat(19),
            "-".repeat(6),
            "-".repeat(10)
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<19}  {:<19}  {:<6}  {}",
                row.start_time.format("%Y-%m-%d %H:%M:%S"),
                row.end_time.format("%Y-%m-%d %H:%M:%S"),
                row.source,
                row.instrument
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryResponse {
        let day = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        QueryResponse {
            rows: vec![QueryRow::for_day(day, "http://x/a.txt".to_string(), "SDO", "eve")],
        }
    }

    #[test]
    fn row_spans_one_day() {
        let resp = sample();
        let row = &resp.rows[0];
        assert_eq!(row.start_time.to_string(), "2016-01-01 00:00:00");
        assert_eq!(row.end_time.to_string(), "2016-01-02 00:00:00");
        assert_eq!(resp.urls(), vec!["http://x/a.txt"]);
    }

    #[test]
    fn table_and_json() {
        let resp = sample();
        let table = resp.to_string();
        assert!(table.starts_with("Start Time"));
        assert!(table.contains("2016-01-01 00:00:00  2016-01-02 00:00:00  SDO     eve"));

        let json: serde_json::Value = serde_json::from_str(&resp.to_json().unwrap()).unwrap();
        assert_eq!(json["rows"][0]["source"], "SDO");
        assert_eq!(json["rows"][0]["start_time"], "2016-01-01T00:00:00");
    }
}
