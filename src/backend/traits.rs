//! Backend trait definitions

use async_trait::async_trait;
use std::sync::Arc;

use super::query::{Filter, Row, SelectQuery};
use crate::errors::BackendResult;

/// Table-level query interface of the managed backend
///
/// Every verb returns either the affected rows or a [`BackendError`]. Callers
/// in the admin panel treat every error the same way.
///
/// [`BackendError`]: crate::errors::BackendError
#[async_trait]
pub trait RowBackend: Send + Sync {
    /// Read rows from `table`
    ///
    /// With [`SelectQuery::single`] set the result holds exactly one row, or
    /// the call fails with `BackendError::NoRows`.
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Row>>;

    /// Insert `rows` into `table`, returning them as stored
    async fn insert(&self, table: &str, rows: Vec<Row>) -> BackendResult<Vec<Row>>;

    /// Apply `patch` to every row of `table` matching `filters`
    async fn update(&self, table: &str, patch: Row, filters: &[Filter]) -> BackendResult<Vec<Row>>;

    /// Delete every row of `table` matching `filters`
    async fn delete(&self, table: &str, filters: &[Filter]) -> BackendResult<()>;

    /// A handle issuing requests on behalf of the holder of `access_token`
    fn scoped(&self, access_token: &str) -> Arc<dyn RowBackend>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}
