//! Response envelope shapes for the tally server's JSON API.
//!
//! The server owns the wire format; these structs mirror it and stay
//! tolerant of Mongo-style `_id` keys and extra fields.

use serde::{Deserialize, Serialize};

use tally_core::{AnalyticsSummary, Category, Transaction};

/// The `{message}` shape: error bodies everywhere, and the acknowledgement
/// body for deletes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// The user record the server returns on login. Persisted client-side for
/// the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
    #[serde(default)]
    pub message: Option<String>,
}

/// Registration hands back a token but no user object; the profile fills in
/// on the next login.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesEnvelope {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsEnvelope {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsEnvelope {
    pub analytics: AnalyticsSummary,
}
