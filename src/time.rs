use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// A closed interval of time used to select archive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a range. Fails if `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            bail!("time range ends ({}) before it starts ({})", end, start);
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from text.
    ///
    /// Accepted forms are `YYYY/M/D` and `YYYY-MM-DD`, optionally followed by
    /// ` HH:MM[:SS]` or `THH:MM[:SS]`. A bare date means midnight.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_time =
            parse_time(start).with_context(|| format!("invalid start time {:?}", start))?;
        let end_time = parse_time(end).with_context(|| format!("invalid end time {:?}", end))?;
        Self::new(start_time, end_time)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar days covered by the range, in order.
    ///
    /// An end that falls exactly on midnight closes the range at the start of
    /// that day, so the day itself is not included (unless the range has zero
    /// length).
    pub fn dates(&self) -> Vec<NaiveDate> {
        let first = self.start.date();
        let last = self.last_date();
        first.iter_days().take_while(|d| *d <= last).collect()
    }

    pub fn day_count(&self) -> usize {
        (self.last_date() - self.start.date()).num_days() as usize + 1
    }

    fn last_date(&self) -> NaiveDate {
        let last = self.end.date();
        if self.end > self.start && self.end.time() == NaiveTime::MIN {
            // end > start at midnight means the previous day is still >= start's day
            last.pred_opt().unwrap_or(last)
        } else {
            last
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

fn parse_time(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    let (date_part, time_part) = match text.split_once(['T', ' ']) {
        Some((d, t)) => (d, Some(t.trim())),
        None => (text, None),
    };

    let date = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(date_part, f).ok())
        .ok_or_else(|| anyhow!("expected a date like 2016/1/1 or 2016-01-01"))?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(t) => TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(t, f).ok())
            .ok_or_else(|| anyhow!("expected a time of day like 12:00 or 12:00:30"))?,
    };

    Ok(date.and_time(time))
}
