//! HTTP client for the expense gateway (`/expenses`, `/expenses/{receipt_id}`)

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use gastos_core::{Expense, ExpenseDraft};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_http_client(base_url, token, reqwest::Client::new())
    }

    /// Same as [`GatewayClient::new`] over a preconfigured `reqwest::Client`.
    pub fn with_http_client(
        base_url: impl Into<String>,
        token: Option<String>,
        http: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            http,
        }
    }

    pub fn expenses_url(&self) -> String {
        format!("{}/expenses", self.base_url)
    }

    /// `{base}/expenses/{receipt_id}`, with the id percent-encoded as one
    /// path segment.
    pub fn expense_url(&self, receipt_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.expenses_url())
            .with_context(|| format!("invalid gateway url {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("gateway url {} cannot take a path", self.base_url))?
            .push(receipt_id);
        Ok(url)
    }

    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> reqwest::RequestBuilder {
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    /// Create one expense. Any non-2xx answer is an error carrying the body.
    pub async fn create_expense(&self, draft: &ExpenseDraft) -> Result<()> {
        let resp = self
            .request(Method::POST, self.expenses_url())
            .json(draft)
            .send()
            .await
            .with_context(|| format!("sending expense for {}", draft.vendor))?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Replace a stored expense with `draft`.
    pub async fn update_expense(&self, receipt_id: &str, draft: &ExpenseDraft) -> Result<()> {
        let url = self.expense_url(receipt_id)?;
        debug!(%url, "updating expense");
        let resp = self
            .request(Method::PUT, url)
            .json(draft)
            .send()
            .await
            .with_context(|| format!("updating expense {receipt_id}"))?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Delete a stored expense. The gateway keys expenses by id and date, so
    /// the date goes in the body.
    pub async fn delete_expense(&self, receipt_id: &str, date: NaiveDate) -> Result<()> {
        let url = self.expense_url(receipt_id)?;
        debug!(%url, %date, "deleting expense");
        let resp = self
            .request(Method::DELETE, url)
            .json(&json!({ "date": date }))
            .send()
            .await
            .with_context(|| format!("deleting expense {receipt_id}"))?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Fetch all stored expenses, newest first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let resp = self
            .request(Method::GET, self.expenses_url())
            .send()
            .await
            .context("fetching expenses")?;
        let resp = ensure_success(resp).await?;

        let body: serde_json::Value = resp.json().await.context("parse gateway response")?;
        parse_expense_list(body)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("gateway error: {status} {}", error_detail(&txt));
    }
    Ok(resp)
}

/// The `message` or `error` field of a JSON error body, else the body as is.
fn error_detail(body: &str) -> String {
    let field = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
    });
    field.unwrap_or_else(|| body.trim().to_string())
}

/// Validate and sort a `GET /expenses` body.
pub fn parse_expense_list(body: serde_json::Value) -> Result<Vec<Expense>> {
    if !body.is_array() {
        bail!("invalid data format received from gateway: expected a JSON array");
    }
    let mut expenses: Vec<Expense> =
        serde_json::from_value(body).context("decode expense list")?;
    // ISO dates sort lexicographically
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(expenses)
}
