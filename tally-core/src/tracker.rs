//! The coordination layer above the two stores.
//!
//! Filter changes and mutations are explicit calls here, not observed side
//! effects, so each contract is testable on its own:
//!
//! 1. a changed transaction filter fetches the list exactly once; an
//!    unchanged one fetches nothing;
//! 2. a changed period filter fetches analytics exactly once;
//! 3. every successful mutation refetches BOTH the list (active filter) and
//!    analytics (active period); a mutation moves totals whether or not it
//!    falls inside the analytics period, so there is no membership check;
//! 4. `bootstrap` runs the initial load: categories once, then an
//!    unfiltered transaction fetch.

use crate::analytics::AnalyticsStore;
use crate::filter::{PeriodFilter, TransactionFilter};
use crate::gateway::{Gateway, GatewayError};
use crate::model::{Category, Transaction, TransactionDraft};
use crate::transactions::TransactionStore;

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub transactions: TransactionStore,
    pub analytics: AnalyticsStore,
    categories: Vec<Category>,
    filter: TransactionFilter,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's cached category list.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The active transaction-list filter.
    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    /// Initial load: categories (cached for the session) and an unfiltered
    /// transaction list. A category failure is logged and tolerated (names
    /// degrade to "Unknown"); a failed transaction fetch propagates.
    pub async fn bootstrap<G: Gateway>(&mut self, gateway: &G) -> Result<(), GatewayError> {
        match gateway.list_categories(None).await {
            Ok(categories) => self.categories = categories,
            Err(err) => tracing::warn!(error = %err, "category fetch failed"),
        }
        self.transactions
            .fetch(gateway, &TransactionFilter::default())
            .await?;
        Ok(())
    }

    /// Apply a new transaction filter. Unchanged filters are a no-op;
    /// anything else triggers exactly one list fetch.
    pub async fn set_filter<G: Gateway>(
        &mut self,
        gateway: &G,
        filter: TransactionFilter,
    ) -> Result<(), GatewayError> {
        if filter == self.filter {
            return Ok(());
        }
        self.filter = filter.clone();
        self.transactions.fetch(gateway, &filter).await?;
        Ok(())
    }

    /// Apply a new analytics period. Unchanged periods are a no-op;
    /// anything else triggers exactly one analytics fetch.
    pub async fn set_period<G: Gateway>(
        &mut self,
        gateway: &G,
        period: PeriodFilter,
    ) -> Result<(), GatewayError> {
        if &period == self.analytics.filter() {
            return Ok(());
        }
        self.analytics.set_filter(period);
        self.analytics.fetch(gateway, None).await?;
        Ok(())
    }

    /// Create a transaction, then bring both stores back in sync.
    pub async fn add<G: Gateway>(
        &mut self,
        gateway: &G,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        let created = self.transactions.create(gateway, draft).await?;
        self.resync(gateway).await;
        Ok(created)
    }

    /// Replace a transaction's fields, then bring both stores back in sync.
    pub async fn edit<G: Gateway>(
        &mut self,
        gateway: &G,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        let updated = self.transactions.update(gateway, id, draft).await?;
        self.resync(gateway).await;
        Ok(updated)
    }

    /// Delete a transaction (optimistic local removal), then bring both
    /// stores back in sync.
    pub async fn remove<G: Gateway>(
        &mut self,
        gateway: &G,
        id: &str,
    ) -> Result<(), GatewayError> {
        self.transactions.delete(gateway, id).await?;
        self.resync(gateway).await;
        Ok(())
    }

    /// Post-mutation refresh of both stores with whatever filters are
    /// active. Failures land in the stores' own error state; the mutation
    /// that triggered the resync has already succeeded.
    async fn resync<G: Gateway>(&mut self, gateway: &G) {
        let filter = self.filter.clone();
        if let Err(err) = self.transactions.fetch(gateway, &filter).await {
            tracing::warn!(error = %err, "transaction refetch after mutation failed");
        }
        if let Err(err) = self.analytics.fetch(gateway, None).await {
            tracing::warn!(error = %err, "analytics refetch after mutation failed");
        }
    }
}
