//! PostgREST client for Supabase-style projects
//!
//! Tables live under `{project}/rest/v1/{table}`. Requests carry the project's
//! anon key as `apikey` and either the signed-in user's access token or the
//! anon key as bearer, so row-level security policies apply.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::query::{Filter, Row, SelectQuery};
use super::traits::RowBackend;
use crate::errors::{AppError, AppResult, BackendError, BackendResult};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NOT_NULL_VIOLATION: &str = "23502";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

#[derive(Clone)]
pub struct PostgrestBackend {
    client: Client,
    rest_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl PostgrestBackend {
    /// Create a client for the project at `project_url`
    pub fn new(project_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let base = Url::parse(project_url)
            .map_err(|e| AppError::configuration(format!("invalid backend url {project_url}: {e}")))?;
        let rest_url = base
            .join("rest/v1/")
            .map_err(|e| AppError::configuration(format!("invalid backend url {project_url}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rest_url,
            api_key: api_key.to_string(),
            access_token: None,
        })
    }

    fn table_url(&self, table: &str) -> BackendResult<Url> {
        self.rest_url
            .join(table)
            .map_err(|e| BackendError::rejected(400, format!("invalid table name {table}: {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    fn apply_filters(url: &mut Url, filters: &[Filter]) {
        let mut pairs = url.query_pairs_mut();
        for filter in filters {
            let (column, value) = filter.to_query_pair();
            pairs.append_pair(&column, &value);
        }
    }

    /// Turn a non-success response into a `BackendError`
    async fn rejection(response: Response, table: &str, single: bool) -> BackendError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if single && status == StatusCode::NOT_ACCEPTABLE {
            return BackendError::no_rows(table);
        }

        match serde_json::from_str::<PostgrestErrorBody>(&body) {
            Ok(error) => {
                let message = error.message.unwrap_or_else(|| body.clone());
                match error.code.as_deref() {
                    Some(FOREIGN_KEY_VIOLATION) => BackendError::constraint_violation(
                        "foreign_key",
                        error.details.unwrap_or(message),
                    ),
                    Some(NOT_NULL_VIOLATION) => BackendError::constraint_violation(
                        "not_null",
                        error.details.unwrap_or(message),
                    ),
                    _ => BackendError::rejected(status.as_u16(), message),
                }
            }
            Err(_) => BackendError::rejected(status.as_u16(), body),
        }
    }

    async fn send(&self, builder: RequestBuilder, table: &str, single: bool) -> BackendResult<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let error = Self::rejection(response, table, single).await;
            warn!(table = %table, error = %error, "Backend request rejected");
            Err(error)
        }
    }

    async fn rows(response: Response) -> BackendResult<Vec<Row>> {
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Row>(&body)? {
            Row::Array(rows) => Ok(rows),
            row => Ok(vec![row]),
        }
    }
}

#[async_trait]
impl RowBackend for PostgrestBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair("select", &query.select_clause());
        Self::apply_filters(&mut url, &query.filters);
        if let Some(order) = query.order_clause() {
            url.query_pairs_mut().append_pair("order", &order);
        }

        debug!(table = %table, url = %url, "Backend select");

        let mut builder = self.request(Method::GET, url);
        if query.single {
            builder = builder.header(header::ACCEPT, SINGLE_OBJECT);
        }
        let response = self.send(builder, table, query.single).await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> BackendResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");

        debug!(table = %table, rows = rows.len(), "Backend insert");

        let builder = self
            .request(Method::POST, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        let response = self.send(builder, table, false).await?;
        Self::rows(response).await
    }

    async fn update(&self, table: &str, patch: Row, filters: &[Filter]) -> BackendResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        Self::apply_filters(&mut url, filters);

        debug!(table = %table, url = %url, "Backend update");

        let builder = self
            .request(Method::PATCH, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        let response = self.send(builder, table, false).await?;
        Self::rows(response).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> BackendResult<()> {
        let mut url = self.table_url(table)?;
        Self::apply_filters(&mut url, filters);

        debug!(table = %table, url = %url, "Backend delete");

        self.send(self.request(Method::DELETE, url), table, false)
            .await?;
        Ok(())
    }

    fn scoped(&self, access_token: &str) -> Arc<dyn RowBackend> {
        Arc::new(Self {
            access_token: Some(access_token.to_string()),
            ..self.clone()
        })
    }

    fn name(&self) -> &'static str {
        "postgrest"
    }
}
