//! The seam between the stores and the remote API.
//!
//! Stores are generic over [`Gateway`] so the whole fetch/mutate pipeline is
//! testable against an in-memory implementation. The real HTTP client lives
//! in the `tally-api` crate.

use crate::analytics::AnalyticsSummary;
use crate::filter::{PeriodFilter, TransactionFilter};
use crate::model::{Category, Transaction, TransactionDraft, TransactionType};

/// A remote-call failure, normalized to a single user-facing message.
/// Transport detail is logged at the gateway layer, not carried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Lifecycle of a gateway-backed store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// The data operations the stores need. Auth endpoints are not part of this
/// trait; they belong to the concrete client.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn list_categories(
        &self,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, GatewayError>;

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, GatewayError>;

    async fn create_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError>;

    async fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError>;

    async fn delete_transaction(&self, id: &str) -> Result<(), GatewayError>;

    async fn fetch_analytics(
        &self,
        period: &PeriodFilter,
    ) -> Result<AnalyticsSummary, GatewayError>;
}
