//! tally-core: data model, store state machines, and aggregation logic for
//! the tally finance-tracking client.
//!
//! Everything here is pure state management: the network lives behind the
//! [`Gateway`] trait, implemented by the `tally-api` crate.

pub mod analytics;
pub mod breakdown;
pub mod filter;
pub mod gateway;
pub mod model;
pub mod tracker;
pub mod transactions;

#[cfg(test)]
pub(crate) mod testutil;

pub use analytics::{AnalyticsStore, AnalyticsSummary, BreakdownEntry};
pub use breakdown::{collapse, no_data_entry, MAX_NAMED_ENTRIES, NO_DATA_COLOR, OTHER_COLOR};
pub use filter::{PeriodFilter, TransactionFilter};
pub use gateway::{Gateway, GatewayError, LoadStatus};
pub use model::{
    categories_for, reconcile_category, Category, CategoryRef, Transaction, TransactionDraft,
    TransactionType, ValidationError,
};
pub use tracker::Tracker;
pub use transactions::TransactionStore;
