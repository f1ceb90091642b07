use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Closed range of calendar days, `start <= end`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Interval of `days` whole days ending on `end` (so `days + 1` dates).
    pub fn ending_on(end: NaiveDate, days: u32) -> Result<Self> {
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or(Error::InvalidValue {
                field: "--history-days",
                value: f64::from(days),
            })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the interval, both endpoints included.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.day_count() as i64).map(move |offset| self.start + Duration::days(offset))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub nav: f64,
}

pub type Series = Vec<SeriesPoint>;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub invested_amount: f64,
    pub units: f64,
    pub purchase_nav: f64,
    pub last_purchase_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Category {
    Equity,
    Midcap,
    Smallcap,
    Largecap,
    Debt,
    Hybrid,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FundMeta {
    pub aum: u64,
    pub category: Category,
}

/// One persisted fund: identity, NAV history and the mock user holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub id: String,
    pub name: String,
    pub meta: FundMeta,
    pub nav_history: Series,
    pub user_holding: Position,
}

/// Identity and NAV anchors for a single fund to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct FundInputs {
    pub id: String,
    pub name: String,
    pub initial_nav: f64,
    pub today_nav: f64,
}

/// History window applied to every generated fund.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GenerateOptions {
    pub end_date: NaiveDate,
    pub history_days: u32,
}

impl GenerateOptions {
    pub const DEFAULT_HISTORY_DAYS: u32 = 365 * 3;

    pub fn interval(&self) -> Result<DateInterval> {
        DateInterval::ending_on(self.end_date, self.history_days)
    }
}
