//! Analytics summary types and the analytics store.
//!
//! Error policy differs from the transaction store: a failed fetch blanks
//! the summary instead of keeping stale numbers. Stale rows are tolerable;
//! stale totals are not.

use serde::{Deserialize, Serialize};

use crate::filter::PeriodFilter;
use crate::gateway::{Gateway, GatewayError, LoadStatus};

/// One category's share of the period's expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    /// Percentage of total expenses, 0–100.
    pub value: f64,
    pub amount: f64,
    pub color: String,
}

/// Server-computed aggregate for one period. Replaced wholesale on every
/// fetch, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub income: f64,
    pub expenses: Vec<BreakdownEntry>,
}

impl AnalyticsSummary {
    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn net_savings(&self) -> f64 {
        self.income - self.total_expenses()
    }

    /// Net savings as a rounded percentage of income; 0 when there is no
    /// income to compare against.
    pub fn savings_rate(&self) -> i64 {
        if self.income > 0.0 {
            (self.net_savings() / self.income * 100.0).round() as i64
        } else {
            0
        }
    }
}

/// Holds the current period's summary and its load lifecycle.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsStore {
    summary: Option<AnalyticsSummary>,
    status: LoadStatus,
    last_error: Option<String>,
    filter: PeriodFilter,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Option<&AnalyticsSummary> {
        self.summary.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn filter(&self) -> &PeriodFilter {
        &self.filter
    }

    /// Replace the stored period filter. Fetching is the tracker's call.
    pub fn set_filter(&mut self, filter: PeriodFilter) {
        self.filter = filter;
    }

    /// Fetch the summary for `period`, or for the stored filter when no
    /// period is given.
    pub async fn fetch<G: Gateway>(
        &mut self,
        gateway: &G,
        period: Option<&PeriodFilter>,
    ) -> Result<&AnalyticsSummary, GatewayError> {
        let period = period.unwrap_or(&self.filter).clone();
        self.status = LoadStatus::Loading;
        self.last_error = None;

        match gateway.fetch_analytics(&period).await {
            Ok(summary) => {
                self.status = LoadStatus::Success;
                Ok(&*self.summary.insert(summary))
            }
            Err(err) => {
                tracing::debug!(year = period.year, month = ?period.month, error = %err, "analytics fetch failed");
                self.summary = None;
                self.status = LoadStatus::Error;
                self.last_error = Some(err.message.clone());
                Err(err)
            }
        }
    }
}
