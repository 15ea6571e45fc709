//! Query builder for the table gateway.
//!
//! Mirrors the gateway's query-string grammar: `select=`, `col=eq.value`,
//! `order=col.desc`, `limit=`, and `on_conflict=` for upserts. Each
//! terminal method issues exactly one request.

use reqwest::Method;
use reqwest::header::{CONTENT_RANGE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::client::{BackendClient, Surface, decode_json};
use crate::error::BackendError;

/// Sort direction for [`TableQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A pending request against one table.
#[must_use = "queries do nothing until a terminal method is awaited"]
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_owned(),
            params: Vec::new(),
        }
    }

    /// Columns to return (`*` for all).
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality predicate.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Sort order.
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".into(), format!("{column}.{}", order.as_str())));
        self
    }

    /// Maximum number of rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    /// Fetch every matching row.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or rows do not decode as `T`.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let url = self.url()?;
        let response = self.client.request(Method::GET, url).send().await?;
        let response = BackendClient::check(response, Surface::Rest).await?;
        decode_json(response).await
    }

    /// Fetch the first matching row, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the row does not decode as `T`.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, BackendError> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// Count matching rows without transferring them.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway omits the total.
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn count(self) -> Result<u64, BackendError> {
        let url = self.url()?;
        let response = self
            .client
            .request(Method::HEAD, url)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = BackendClient::check(response, Surface::Rest).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(content_range_total)
            .ok_or_else(|| BackendError::Decode("missing Content-Range total".into()))
    }

    /// Insert one row.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the row.
    #[instrument(skip(self, row), fields(table = %self.table))]
    pub async fn insert<B: Serialize + Sync>(self, row: &B) -> Result<(), BackendError> {
        self.write(Method::POST, row, "return=minimal").await
    }

    /// Update every matching row with the given columns.
    ///
    /// Returns the number of rows the gateway reports as changed.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the update.
    #[instrument(skip(self, changes), fields(table = %self.table))]
    pub async fn update<B: Serialize + Sync>(self, changes: &B) -> Result<usize, BackendError> {
        let url = self.url()?;
        let response = self
            .client
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;
        let response = BackendClient::check(response, Surface::Rest).await?;
        let rows: Vec<serde_json::Value> = decode_json(response).await?;
        Ok(rows.len())
    }

    /// Insert the row, or replace the existing row that collides on
    /// `on_conflict` (comma-separated unique columns).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the row.
    #[instrument(skip(self, row), fields(table = %self.table))]
    pub async fn upsert<B: Serialize + Sync>(
        mut self,
        row: &B,
        on_conflict: &str,
    ) -> Result<(), BackendError> {
        self.params
            .push(("on_conflict".into(), on_conflict.into()));
        self.write(
            Method::POST,
            row,
            "resolution=merge-duplicates,return=minimal",
        )
        .await
    }

    async fn write<B: Serialize + Sync>(
        self,
        method: Method,
        body: &B,
        prefer: &'static str,
    ) -> Result<(), BackendError> {
        let url = self.url()?;
        let response = self
            .client
            .request(method, url)
            .header("Prefer", HeaderValue::from_static(prefer))
            .json(body)
            .send()
            .await?;
        BackendClient::check(response, Surface::Rest).await?;
        Ok(())
    }

    fn url(&self) -> Result<Url, BackendError> {
        let mut url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

/// Total from a `Content-Range` header: `0-24/573` or `*/573`.
fn content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}
