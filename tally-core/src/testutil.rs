//! In-memory recording gateway used by the store and tracker tests.

use std::cell::{Cell, RefCell};

use chrono::NaiveDate;

use crate::analytics::{AnalyticsSummary, BreakdownEntry};
use crate::filter::{PeriodFilter, TransactionFilter};
use crate::gateway::{Gateway, GatewayError};
use crate::model::{Category, CategoryRef, Transaction, TransactionDraft, TransactionType};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCategories(Option<TransactionType>),
    ListTransactions(TransactionFilter),
    Create(String),
    Update(String),
    Delete(String),
    Analytics(PeriodFilter),
}

/// Canned-response gateway that records every call it receives. Failure
/// flags flip individual operations into their normalized error.
pub struct RecordingGateway {
    calls: RefCell<Vec<Call>>,
    transactions: RefCell<Vec<Transaction>>,
    categories: Vec<Category>,
    summary: AnalyticsSummary,
    pub fail_transactions: Cell<bool>,
    pub fail_analytics: Cell<bool>,
    pub fail_mutations: Cell<bool>,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            transactions: RefCell::new(Vec::new()),
            categories: vec![
                Category {
                    id: "c1".into(),
                    name: "Salary".into(),
                    kind: TransactionType::Income,
                },
                Category {
                    id: "c2".into(),
                    name: "Groceries".into(),
                    kind: TransactionType::Expense,
                },
            ],
            summary: AnalyticsSummary {
                income: 50_000.0,
                expenses: vec![
                    entry("Rent", 60.0, 24_000.0),
                    entry("Groceries", 40.0, 16_000.0),
                ],
            },
            fail_transactions: Cell::new(false),
            fail_analytics: Cell::new(false),
            fail_mutations: Cell::new(false),
        }
    }
}

impl RecordingGateway {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let gateway = Self::default();
        gateway.set_transactions(transactions);
        gateway
    }

    pub fn set_transactions(&self, transactions: Vec<Transaction>) {
        *self.transactions.borrow_mut() = transactions;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn analytics_calls(&self) -> Vec<PeriodFilter> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Analytics(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Gateway for RecordingGateway {
    async fn list_categories(
        &self,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, GatewayError> {
        self.record(Call::ListCategories(kind));
        Ok(self.categories.clone())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, GatewayError> {
        self.record(Call::ListTransactions(filter.clone()));
        if self.fail_transactions.get() {
            return Err(GatewayError::new("Fetch transactions failed"));
        }
        Ok(self.transactions.borrow().clone())
    }

    async fn create_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        self.record(Call::Create(draft.description.clone()));
        if self.fail_mutations.get() {
            return Err(GatewayError::new("Create transaction failed"));
        }
        Ok(materialize("new-1", draft))
    }

    async fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        self.record(Call::Update(id.to_string()));
        if self.fail_mutations.get() {
            return Err(GatewayError::new("Update transaction failed"));
        }
        Ok(materialize(id, draft))
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), GatewayError> {
        self.record(Call::Delete(id.to_string()));
        if self.fail_mutations.get() {
            return Err(GatewayError::new("Delete transaction failed"));
        }
        Ok(())
    }

    async fn fetch_analytics(
        &self,
        period: &PeriodFilter,
    ) -> Result<AnalyticsSummary, GatewayError> {
        self.record(Call::Analytics(period.clone()));
        if self.fail_analytics.get() {
            return Err(GatewayError::new("Fetch analytics failed"));
        }
        Ok(self.summary.clone())
    }
}

fn materialize(id: &str, draft: &TransactionDraft) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: draft.date,
        kind: draft.kind,
        description: draft.description.clone(),
        category: CategoryRef::Id(draft.category.clone()),
        amount: draft.amount,
    }
}

pub fn tx(id: &str, amount: f64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
        kind: TransactionType::Expense,
        description: format!("sample {id}"),
        category: CategoryRef::Id("c2".into()),
        amount,
    }
}

pub fn draft(description: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
        kind: TransactionType::Expense,
        description: description.to_string(),
        category: "c2".into(),
        amount,
    }
}

pub fn entry(name: &str, value: f64, amount: f64) -> BreakdownEntry {
    BreakdownEntry {
        name: name.to_string(),
        value,
        amount,
        color: "#3B82F6".to_string(),
    }
}
