use anyhow::Result;
use std::fmt;

use crate::time::TimeRange;

/// One search filter of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAttr {
    Time(TimeRange),
    Instrument(String),
    Level(Level),
    Source(String),
    Provider(String),
    Physobs(String),
}

/// Processing level of the requested data. Archives label levels with
/// numbers (`0`, `1`, `2.5`) or names (`"0CS"`), so both are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Level {
    Number(f64),
    Text(String),
}

impl QueryAttr {
    /// Shorthand for `QueryAttr::Time(TimeRange::parse(start, end)?)`.
    pub fn time(start: &str, end: &str) -> Result<Self> {
        Ok(Self::Time(TimeRange::parse(start, end)?))
    }

    pub fn instrument(name: impl Into<String>) -> Self {
        Self::Instrument(name.into())
    }

    pub fn level(level: impl Into<Level>) -> Self {
        Self::Level(level.into())
    }

    pub fn source(name: impl Into<String>) -> Self {
        Self::Source(name.into())
    }

    pub fn provider(name: impl Into<String>) -> Self {
        Self::Provider(name.into())
    }

    pub fn physobs(name: impl Into<String>) -> Self {
        Self::Physobs(name.into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Time(_) => "Time",
            Self::Instrument(_) => "Instrument",
            Self::Level(_) => "Level",
            Self::Source(_) => "Source",
            Self::Provider(_) => "Provider",
            Self::Physobs(_) => "Physobs",
        }
    }
}

impl fmt::Display for QueryAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(range) => write!(f, "Time({})", range),
            Self::Level(level) => write!(f, "Level({})", level),
            Self::Instrument(v) | Self::Source(v) | Self::Provider(v) | Self::Physobs(v) => {
                write!(f, "{}({})", self.name(), v)
            }
        }
    }
}

impl Level {
    /// Exact numeric comparison; textual levels never match.
    pub fn is_number(&self, n: f64) -> bool {
        matches!(self, Self::Number(v) if *v == n)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Level {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<f64> for Level {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// First time range in the query, if any.
pub(crate) fn time_of(query: &[QueryAttr]) -> Option<&TimeRange> {
    query.iter().find_map(|a| match a {
        QueryAttr::Time(range) => Some(range),
        _ => None,
    })
}

pub(crate) fn describe(query: &[QueryAttr]) -> String {
    if query.is_empty() {
        return "(empty query)".to_string();
    }
    query
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_matching_is_exact_and_numeric() {
        assert!(Level::from(0).is_number(0.0));
        assert!(Level::from(0.0).is_number(0.0));
        assert!(!Level::from(0.5).is_number(0.0));
        assert!(!Level::from("0").is_number(0.0));
    }

    #[test]
    fn time_of_picks_first_range() {
        let first = QueryAttr::time("2016/1/1", "2016/1/2").unwrap();
        let second = QueryAttr::time("2017/1/1", "2017/1/2").unwrap();
        let query = vec![QueryAttr::instrument("eve"), first.clone(), second];
        match first {
            QueryAttr::Time(expected) => assert_eq!(time_of(&query), Some(&expected)),
            _ => unreachable!(),
        }
        assert_eq!(time_of(&[QueryAttr::level(0)]), None);
    }

    #[test]
    fn describe_lists_attributes() {
        let query = vec![QueryAttr::instrument("EVE"), QueryAttr::level(0)];
        assert_eq!(describe(&query), "Instrument(EVE), Level(0)");
        assert_eq!(describe(&[]), "(empty query)");
    }
}
