//! Document store adapter over the SQLite pool.
//!
//! Presents collection-level primitives (insert, find, count, merge-update)
//! in the shape of a document database. Bodies are JSON text; filters and
//! sorts go through `json_extract`, with `julianday()` normalizing ISO-8601
//! timestamps of varying sub-second precision before comparison.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Row, Sqlite, SqlitePool};

use crate::errors::AppError;
use crate::models::Document;

/// Lists are capped at this many rows; no pagination cursor is exposed.
const LIST_CAP: i64 = 1000;

/// Filter for find/count operations. Covers the two shapes the API needs:
/// exact field equality and a closed timestamp range.
#[derive(Debug, Clone, Default)]
pub struct DocQuery {
    eq: Vec<(&'static str, String)>,
    range: Option<(&'static str, String, String)>,
}

impl DocQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value` exactly.
    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.eq.push((field, value.into()));
        self
    }

    /// Match documents whose timestamp `field` falls within `[start, end]`.
    pub fn between(
        mut self,
        field: &'static str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        self.range = Some((field, start.to_rfc3339(), end.to_rfc3339()));
        self
    }
}

/// Collection-level CRUD primitives shared by all handlers.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single document into its collection.
    pub async fn insert_one<T: Document>(&self, doc: &T) -> Result<(), AppError> {
        let body = serde_json::to_string(doc)?;
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(T::COLLECTION)
            .bind(doc.id())
            .bind(body)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a batch of documents in one transaction.
    pub async fn insert_many<T: Document>(&self, docs: &[T]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for doc in docs {
            let body = serde_json::to_string(doc)?;
            sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
                .bind(T::COLLECTION)
                .bind(doc.id())
                .bind(body)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Find matching documents, newest first by the document's timestamp
    /// field, capped at [`LIST_CAP`] rows.
    pub async fn find<T: Document>(&self, query: &DocQuery) -> Result<Vec<T>, AppError> {
        let mut sql = String::from("SELECT body FROM documents WHERE collection = ?");
        push_filter_sql(&mut sql, query);
        sql.push_str(" ORDER BY julianday(json_extract(body, ?)) DESC LIMIT ?");

        let mut q = sqlx::query(&sql).bind(T::COLLECTION);
        q = bind_filters(q, query);
        let rows = q
            .bind(format!("$.{}", T::TIMESTAMP_FIELD))
            .bind(LIST_CAP)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| serde_json::from_str(row.get::<&str, _>("body")).map_err(AppError::from))
            .collect()
    }

    /// Count matching documents in a collection.
    pub async fn count<T: Document>(&self, query: &DocQuery) -> Result<i64, AppError> {
        let mut sql = String::from("SELECT COUNT(*) AS n FROM documents WHERE collection = ?");
        push_filter_sql(&mut sql, query);

        let mut q = sqlx::query(&sql).bind(T::COLLECTION);
        q = bind_filters(q, query);
        let row = q.fetch_one(&self.pool).await?;
        Ok(row.get("n"))
    }

    /// Merge `patch` into the document with the given id and return the
    /// updated document, or `None` if no document matches.
    pub async fn find_one_and_update<T: Document>(
        &self,
        id: &str,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<T>, AppError> {
        let patch_json = serde_json::to_string(patch)?;
        let row = sqlx::query(
            "UPDATE documents SET body = json_patch(body, ?) \
             WHERE collection = ? AND id = ? RETURNING body",
        )
        .bind(patch_json)
        .bind(T::COLLECTION)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| serde_json::from_str(row.get::<&str, _>("body")).map_err(AppError::from))
            .transpose()
    }

    /// Close the underlying pool. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn push_filter_sql(sql: &mut String, query: &DocQuery) {
    for _ in &query.eq {
        sql.push_str(" AND json_extract(body, ?) = ?");
    }
    if query.range.is_some() {
        sql.push_str(" AND julianday(json_extract(body, ?)) BETWEEN julianday(?) AND julianday(?)");
    }
}

fn bind_filters<'q>(
    mut q: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    query: &'q DocQuery,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for (field, value) in &query.eq {
        q = q.bind(format!("$.{}", field)).bind(value.as_str());
    }
    if let Some((field, start, end)) = &query.range {
        q = q
            .bind(format!("$.{}", field))
            .bind(start.as_str())
            .bind(end.as_str());
    }
    q
}
