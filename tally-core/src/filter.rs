//! Filter state for the transaction list and the analytics period.
//!
//! Both filters are plain values: changing one goes through the tracker,
//! which owns the fetch-on-change contract. The modifiers here return
//! updated copies so a change is always expressed against the previous
//! filter (shallow merge).

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::TransactionType;

/// Which subset of transactions the list shows. Empty filter = everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        *self == TransactionFilter::default()
    }

    pub fn with_kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// The date range to send: only complete ranges count.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// The (year, optional month) pair selecting an analytics aggregate.
/// No month means the whole year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub year: i32,
    pub month: Option<u32>,
}

impl PeriodFilter {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self {
            year,
            month: Some(month),
        }
    }

    /// Default period: the current calendar year, no month.
    pub fn this_year() -> Self {
        Self::year(Utc::now().year())
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_month(mut self, month: Option<u32>) -> Self {
        self.month = month;
        self
    }
}

impl Default for PeriodFilter {
    fn default() -> Self {
        Self::this_year()
    }
}
