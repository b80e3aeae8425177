//! The transaction list store.
//!
//! Mutations are asymmetric:
//! - `create`/`update` never touch `items`. The server computes fields the
//!   client cannot (a populated category, for one), so the caller refetches
//!   to observe the change.
//! - `delete` removes the matching row immediately; nothing about a removed
//!   row needs the server's view.
//!
//! A failed fetch keeps the last-known-good list so an error never blanks
//! the screen.

use crate::filter::TransactionFilter;
use crate::gateway::{Gateway, GatewayError, LoadStatus};
use crate::model::{Transaction, TransactionDraft};

#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    items: Vec<Transaction>,
    status: LoadStatus,
    last_error: Option<String>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the transactions matching `filter` and replace the list
    /// wholesale. On failure the previous list is preserved.
    pub async fn fetch<G: Gateway>(
        &mut self,
        gateway: &G,
        filter: &TransactionFilter,
    ) -> Result<&[Transaction], GatewayError> {
        self.status = LoadStatus::Loading;
        self.last_error = None;

        match gateway.list_transactions(filter).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "transactions fetched");
                self.items = items;
                self.status = LoadStatus::Success;
                Ok(&self.items)
            }
            Err(err) => {
                self.status = LoadStatus::Error;
                self.last_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Create a transaction on the server. The local list is NOT updated;
    /// refetch to observe the new row.
    pub async fn create<G: Gateway>(
        &self,
        gateway: &G,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        gateway.create_transaction(draft).await
    }

    /// Replace a transaction's fields on the server. As with `create`, the
    /// local list is left alone until the next fetch.
    pub async fn update<G: Gateway>(
        &self,
        gateway: &G,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        gateway.update_transaction(id, draft).await
    }

    /// Delete a transaction and remove it from the local list immediately.
    pub async fn delete<G: Gateway>(
        &mut self,
        gateway: &G,
        id: &str,
    ) -> Result<(), GatewayError> {
        gateway.delete_transaction(id).await?;
        self.items.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{draft, tx, RecordingGateway};

    #[tokio::test]
    async fn fetch_replaces_items_wholesale() {
        let gateway = RecordingGateway::with_transactions(vec![tx("t1", 100.0), tx("t2", 50.0)]);
        let mut store = TransactionStore::new();

        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.status(), LoadStatus::Success);

        gateway.set_transactions(vec![tx("t3", 10.0)]);
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();

        let ids: Vec<_> = store.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t3"]);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_items() {
        let gateway = RecordingGateway::with_transactions(vec![tx("t1", 100.0)]);
        let mut store = TransactionStore::new();
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();

        gateway.fail_transactions.set(true);
        let err = store
            .fetch(&gateway, &TransactionFilter::default())
            .await
            .unwrap_err();

        assert_eq!(store.items().len(), 1, "error must not blank the list");
        assert_eq!(store.status(), LoadStatus::Error);
        assert_eq!(store.last_error(), Some(err.message.as_str()));
    }

    #[tokio::test]
    async fn create_leaves_items_untouched_until_refetch() {
        let gateway = RecordingGateway::with_transactions(vec![tx("t1", 100.0)]);
        let mut store = TransactionStore::new();
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();

        let created = store.create(&gateway, &draft("Coffee", 4.5)).await.unwrap();
        assert_eq!(store.items().len(), 1, "create is not optimistic");

        // Only an explicit fetch makes the new row visible.
        gateway.set_transactions(vec![tx("t1", 100.0), created.clone()]);
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();
        assert!(store.items().iter().any(|t| t.id == created.id));
    }

    #[tokio::test]
    async fn delete_removes_locally_before_any_refetch() {
        let gateway = RecordingGateway::with_transactions(vec![tx("t1", 100.0), tx("t2", 50.0)]);
        let mut store = TransactionStore::new();
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();

        store.delete(&gateway, "t1").await.unwrap();

        let ids: Vec<_> = store.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2"], "delete is optimistic");
    }

    #[tokio::test]
    async fn failed_mutations_leave_store_unchanged() {
        let gateway = RecordingGateway::with_transactions(vec![tx("t1", 100.0)]);
        let mut store = TransactionStore::new();
        store.fetch(&gateway, &TransactionFilter::default()).await.unwrap();

        gateway.fail_mutations.set(true);
        assert!(store.create(&gateway, &draft("Coffee", 4.5)).await.is_err());
        assert!(store.update(&gateway, "t1", &draft("Tea", 3.0)).await.is_err());
        assert!(store.delete(&gateway, "t1").await.is_err());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.status(), LoadStatus::Success);
        assert_eq!(store.last_error(), None);
    }
}
