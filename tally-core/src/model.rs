//! Transaction and category record types shared by the stores and the
//! gateway.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a transaction. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// A spending/income category. Read-only for this client; the server owns
/// the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A transaction's category field: an id string on writes, usually a
/// populated object on reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Populated(Category),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Populated(c) => &c.id,
        }
    }

    /// Category display name, when the server populated it.
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Populated(c) => Some(&c.name),
        }
    }
}

/// A single income or expense record, as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub category: CategoryRef,
    pub amount: f64,
}

impl Transaction {
    /// Resolve the category name against the cached category list.
    pub fn category_name<'a>(&'a self, categories: &'a [Category]) -> &'a str {
        if let Some(name) = self.category.name() {
            return name;
        }
        categories
            .iter()
            .find(|c| c.id == self.category.id())
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// The user-entered fields of a transaction; `id` is server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl TransactionDraft {
    /// Field-level checks that must pass before the draft is sent anywhere.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("a category must be chosen")]
    MissingCategory,
    #[error("amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
}

/// The categories a transaction of `kind` may use.
pub fn categories_for(categories: &[Category], kind: TransactionType) -> Vec<&Category> {
    categories.iter().filter(|c| c.kind == kind).collect()
}

/// Keep a previously chosen category across a type switch only if it is
/// still valid for the new type.
pub fn reconcile_category(
    selected: Option<&str>,
    kind: TransactionType,
    categories: &[Category],
) -> Option<String> {
    let id = selected?;
    categories
        .iter()
        .any(|c| c.id == id && c.kind == kind)
        .then(|| id.to_string())
}

/// Calendar dates on the wire: plain `YYYY-MM-DD`, but reads tolerate a
/// trailing time component (the server stores full timestamps).
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        let day = raw.split('T').next().unwrap_or(raw.as_str());
        NaiveDate::parse_from_str(day, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_categories() -> Vec<Category> {
        vec![
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
            Category {
                id: "c3".into(),
                name: "Rent".into(),
                kind: TransactionType::Expense,
            },
        ]
    }

    #[test]
    fn categories_for_filters_by_type() {
        let cats = sample_categories();
        let expense: Vec<_> = categories_for(&cats, TransactionType::Expense)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(expense, vec!["c2", "c3"]);

        let income: Vec<_> = categories_for(&cats, TransactionType::Income)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(income, vec!["c1"]);
    }

    #[test]
    fn type_switch_clears_invalid_category() {
        let cats = sample_categories();
        // Groceries is an expense category; switching to income clears it.
        assert_eq!(
            reconcile_category(Some("c2"), TransactionType::Income, &cats),
            None
        );
        // Still an expense: the choice survives.
        assert_eq!(
            reconcile_category(Some("c2"), TransactionType::Expense, &cats),
            Some("c2".to_string())
        );
        assert_eq!(reconcile_category(None, TransactionType::Expense, &cats), None);
    }

    #[test]
    fn draft_validation_rejects_bad_fields() {
        let mut draft = TransactionDraft {
            date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            kind: TransactionType::Expense,
            description: "Weekly shop".into(),
            category: "c2".into(),
            amount: 1250.0,
        };
        assert!(draft.validate().is_ok());

        draft.description = "   ".into();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyDescription));

        draft.description = "Weekly shop".into();
        draft.category = String::new();
        assert_eq!(draft.validate(), Err(ValidationError::MissingCategory));

        draft.category = "c2".into();
        draft.amount = -5.0;
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn transaction_accepts_mongo_style_documents() {
        let json = r#"{
            "_id": "t1",
            "date": "2025-09-12T00:00:00.000Z",
            "type": "expense",
            "description": "Weekly shop",
            "category": {"_id": "c2", "name": "Groceries", "type": "expense"},
            "amount": 1250.5
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, "t1");
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 9, 12).unwrap());
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.category.name(), Some("Groceries"));
        assert_eq!(t.category.id(), "c2");
    }

    #[test]
    fn category_name_falls_back_to_cache_then_unknown() {
        let cats = sample_categories();
        let t = Transaction {
            id: "t1".into(),
            date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            kind: TransactionType::Expense,
            description: "Weekly shop".into(),
            category: CategoryRef::Id("c2".into()),
            amount: 100.0,
        };
        assert_eq!(t.category_name(&cats), "Groceries");

        let orphan = Transaction {
            category: CategoryRef::Id("gone".into()),
            ..t
        };
        assert_eq!(orphan.category_name(&cats), "Unknown");
    }
}
