//! SDO/EVE Level 0CS quicklook diode data served by LASP.
//!
//! Files are one per day, one-minute cadence, at
//! `<BASE_URL>/<YYYY>/<YYYYMMDD>_EVE_L0CS_DIODES_1m.txt`.
//! Only Level 0 queries for the EVE instrument are served.

use chrono::NaiveDate;

use crate::attrs::QueryAttr;
use crate::client::{DataClient, Metadata};
use crate::time::TimeRange;
use crate::util::urljoin;

/// Root of the LASP space-weather quicklook tree.
pub const BASE_URL: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/quicklook/L0CS/SpWx/";

const FILE_SUFFIX: &str = "_EVE_L0CS_DIODES_1m.txt";

/// Client for EVE Level 0CS quicklook irradiance files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EveClient {
    map: Metadata,
}

impl EveClient {
    pub fn new() -> Self {
        let mut client = Self {
            map: Metadata::default(),
        };
        client.make_imap();
        client
    }

    fn make_imap(&mut self) {
        self.map.insert("source", "SDO");
        self.map.insert("provider", "LASP");
        self.map.insert("instrument", "eve");
        self.map.insert("phyobs", "irradiance");
    }

    /// URL of the quicklook file for `date`.
    pub fn url_for_date(&self, date: NaiveDate) -> String {
        let path = format!("{}{}", date.format("%Y/%Y%m%d"), FILE_SUFFIX);
        urljoin(BASE_URL, &path)
    }

    /// True iff the query asks for `Instrument("eve")` (any case) and `Level(0)`.
    pub fn can_handle_query(query: &[QueryAttr]) -> bool {
        let is_eve = query
            .iter()
            .any(|a| matches!(a, QueryAttr::Instrument(name) if name.eq_ignore_ascii_case("eve")));
        let is_level_zero = query
            .iter()
            .any(|a| matches!(a, QueryAttr::Level(level) if level.is_number(0.0)));
        is_eve && is_level_zero
    }
}

impl Default for EveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataClient for EveClient {
    fn name(&self) -> &'static str {
        "eve"
    }

    fn handles(&self, query: &[QueryAttr]) -> bool {
        Self::can_handle_query(query)
    }

    fn metadata(&self) -> &Metadata {
        &self.map
    }

    fn urls_for_timerange(&self, range: &TimeRange) -> Vec<String> {
        let urls: Vec<String> = range
            .dates()
            .into_iter()
            .map(|day| self.url_for_date(day))
            .collect();
        tracing::debug!(%range, count = urls.len(), "built EVE quicklook urls");
        urls
    }
}
