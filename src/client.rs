use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::attrs::{QueryAttr, describe, time_of};
use crate::eve::EveClient;
use crate::response::{QueryResponse, QueryRow};
use crate::time::TimeRange;

/// Source description attached to every result row of a client.
///
/// Keys are `source`, `provider`, `instrument` and `phyobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// A handler for one remote archive.
///
/// Implementors map days to URLs and decide which queries they serve;
/// [`DataClient::search`] is derived from those two.
pub trait DataClient: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this client can service `query`.
    fn handles(&self, query: &[QueryAttr]) -> bool;

    fn metadata(&self) -> &Metadata;

    /// One URL per day of `range`, in day order.
    fn urls_for_timerange(&self, range: &TimeRange) -> Vec<String>;

    /// Lists the files covering the query's time range.
    fn search(&self, query: &[QueryAttr]) -> Result<QueryResponse> {
        let range = time_of(query)
            .ok_or_else(|| anyhow!("query has no Time attribute: {}", describe(query)))?;

        let meta = self.metadata();
        let source = meta.get("source").unwrap_or_default();
        let instrument = meta.get("instrument").unwrap_or_default();

        let rows: Vec<QueryRow> = range
            .dates()
            .into_iter()
            .zip(self.urls_for_timerange(range))
            .map(|(day, url)| QueryRow::for_day(day, url, source, instrument))
            .collect();

        tracing::debug!(client = self.name(), %range, rows = rows.len(), "search complete");
        Ok(QueryResponse { rows })
    }
}

/// Picks the client responsible for a query.
pub struct Dispatcher {
    clients: Vec<Box<dyn DataClient>>,
}

impl Dispatcher {
    /// A dispatcher with every built-in client registered.
    pub fn new() -> Self {
        let mut d = Self::empty();
        d.register(EveClient::new());
        d
    }

    pub fn empty() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Adds a client. Earlier registrations win when several accept a query.
    pub fn register<C: DataClient + 'static>(&mut self, client: C) -> &mut Self {
        self.clients.push(Box::new(client));
        self
    }

    pub fn clients(&self) -> impl Iterator<Item = &dyn DataClient> {
        self.clients.iter().map(|c| c.as_ref())
    }

    pub fn client_for(&self, query: &[QueryAttr]) -> Option<&dyn DataClient> {
        self.clients().find(|c| c.handles(query))
    }

    pub fn search(&self, query: &[QueryAttr]) -> Result<QueryResponse> {
        let client = self
            .client_for(query)
            .ok_or_else(|| anyhow!("no client can handle query: {}", describe(query)))?;
        tracing::debug!(client = client.name(), "dispatching query");
        client.search(query)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
