//! The HTTP client behind the stores' [`Gateway`] seam, plus the auth
//! endpoints the stores never touch.
//!
//! Failure normalization: every error (transport, non-2xx, malformed body)
//! becomes a [`GatewayError`] carrying either the server's `message` or a
//! fixed per-operation fallback. The underlying detail is logged at debug
//! level before it is dropped.

use std::path::PathBuf;

use reqwest::multipart;
use serde::de::DeserializeOwned;

use tally_core::{
    AnalyticsSummary, Category, Gateway, GatewayError, PeriodFilter, Transaction,
    TransactionDraft, TransactionFilter, TransactionType,
};

use crate::wire::{
    AnalyticsEnvelope, ApiMessage, CategoriesEnvelope, LoginResponse, RegisterResponse,
    TransactionsEnvelope,
};

/// Registration form data. The profile image is optional and uploaded as a
/// multipart file part.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<PathBuf>,
}

/// Typed client for the tally server. The session credential is handed in
/// at construction; there is no ambient token lookup.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer credential when one is present. A missing token is
    /// not an error here; the server enforces authorization.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.put(self.url(path)))
    }

    fn delete_req(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.delete(self.url(path)))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T, GatewayError> {
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(error = %err, "request failed before a response arrived");
                return Err(GatewayError::new(fallback));
            }
        };

        let status = resp.status();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(error = %err, "response body could not be read");
                return Err(GatewayError::new(fallback));
            }
        };

        if !status.is_success() {
            tracing::debug!(%status, "server rejected the request");
            return Err(GatewayError::new(error_message(&body, fallback)));
        }

        serde_json::from_slice(&body).map_err(|err| {
            tracing::debug!(error = %err, "malformed response body");
            GatewayError::new(fallback)
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.execute(self.post("/auth/login").json(&body), "Login failed")
            .await
    }

    pub async fn register(&self, form: RegisterForm) -> Result<RegisterResponse, GatewayError> {
        let mut parts = multipart::Form::new()
            .text("username", form.username)
            .text("email", form.email)
            .text("password", form.password);

        if let Some(path) = form.profile_image {
            let bytes = tokio::fs::read(&path).await.map_err(|err| {
                GatewayError::new(format!("Could not read profile image {}: {err}", path.display()))
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "profile".to_string());
            parts = parts.part("profileImage", multipart::Part::bytes(bytes).file_name(file_name));
        }

        self.execute(
            self.post("/auth/register").multipart(parts),
            "Registration failed",
        )
        .await
    }
}

impl Gateway for ApiClient {
    async fn list_categories(
        &self,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, GatewayError> {
        let mut req = self.get("/categories");
        if let Some(kind) = kind {
            req = req.query(&[("type", kind.to_string())]);
        }
        let env: CategoriesEnvelope = self.execute(req, "Fetch categories failed").await?;
        Ok(env.categories)
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, GatewayError> {
        let req = self.get("/transactions").query(&transaction_query(filter));
        let env: TransactionsEnvelope = self.execute(req, "Fetch transactions failed").await?;
        Ok(env.transactions)
    }

    async fn create_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        self.execute(
            self.post("/transactions").json(draft),
            "Create transaction failed",
        )
        .await
    }

    async fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, GatewayError> {
        self.execute(
            self.put(&format!("/transactions/{id}")).json(draft),
            "Update transaction failed",
        )
        .await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), GatewayError> {
        let _ack: ApiMessage = self
            .execute(
                self.delete_req(&format!("/transactions/{id}")),
                "Delete transaction failed",
            )
            .await?;
        Ok(())
    }

    async fn fetch_analytics(
        &self,
        period: &PeriodFilter,
    ) -> Result<AnalyticsSummary, GatewayError> {
        let req = self.get("/analytics").query(&analytics_query(period));
        let env: AnalyticsEnvelope = self.execute(req, "Fetch analytics failed").await?;
        Ok(env.analytics)
    }
}

/// Pick the server's error message out of a failure body, falling back to
/// the operation's fixed default when there is none.
fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Query pairs for the transaction list. The date range is only sent when
/// both ends are present.
pub fn transaction_query(filter: &TransactionFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(kind) = filter.kind {
        query.push(("type", kind.to_string()));
    }
    if let Some(category) = &filter.category {
        query.push(("category", category.clone()));
    }
    if let Some((start, end)) = filter.date_range() {
        query.push(("start", start.format("%Y-%m-%d").to_string()));
        query.push(("end", end.format("%Y-%m-%d").to_string()));
    }
    query
}

/// Query pairs for the analytics endpoint. Year is always present by
/// construction.
pub fn analytics_query(period: &PeriodFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![("year", period.year.to_string())];
    if let Some(month) = period.month {
        query.push(("month", month.to_string()));
    }
    query
}
