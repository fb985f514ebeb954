//! Postgres-backed event catalog.
//!
//! Reads the `events` table. The `tier` column is plain text with no check
//! constraint, so rows go through [`EventRecord::from_row`] like any other
//! untrusted source.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use eventtier_core::EventId;
use eventtier_listings::{EventRecord, RawEventRow};

use super::{CatalogError, EventCatalog};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id          UUID PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    event_date  TIMESTAMPTZ NOT NULL,
    image_url   TEXT,
    tier        TEXT,
    created_at  TIMESTAMPTZ DEFAULT now()
)
"#;

pub struct PostgresEventCatalog {
    pool: Arc<PgPool>,
}

impl PostgresEventCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `events` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), CatalogError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    /// Insert or replace a row (seeding and tests).
    pub async fn upsert_row(&self, row: &RawEventRow) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, event_date, image_url, tier, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now()))
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                event_date = EXCLUDED.event_date,
                image_url = EXCLUDED.image_url,
                tier = EXCLUDED.tier
            "#,
        )
        .bind(row.id.as_uuid())
        .bind(&row.title)
        .bind(row.description.as_deref())
        .bind(row.event_date)
        .bind(row.image_url.as_deref())
        .bind(row.tier.as_deref())
        .bind(row.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_event", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EventCatalog for PostgresEventCatalog {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, event_date, image_url, tier, created_at
            FROM events
            ORDER BY event_date ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_events", e))?;

        rows.iter()
            .map(|row| decode_row(row).map(EventRecord::from_row))
            .collect()
    }

    async fn sample_events(&self, limit: usize) -> Result<Vec<EventRecord>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, event_date, image_url, tier, created_at
            FROM events
            ORDER BY event_date ASC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("sample_events", e))?;

        rows.iter()
            .map(|row| decode_row(row).map(EventRecord::from_row))
            .collect()
    }

    async fn get_event(&self, id: EventId) -> Result<Option<EventRecord>, CatalogError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, event_date, image_url, tier, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_event", e))?;

        row.as_ref()
            .map(|r| decode_row(r).map(EventRecord::from_row))
            .transpose()
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ping", e))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

fn decode_row(row: &PgRow) -> Result<RawEventRow, CatalogError> {
    let decode = |col: &str, e: sqlx::Error| CatalogError::Decode(format!("column {col}: {e}"));

    Ok(RawEventRow {
        id: EventId::from_uuid(row.try_get::<uuid::Uuid, _>("id").map_err(|e| decode("id", e))?),
        title: row.try_get("title").map_err(|e| decode("title", e))?,
        description: row
            .try_get::<Option<String>, _>("description")
            .map_err(|e| decode("description", e))?,
        event_date: row
            .try_get::<DateTime<Utc>, _>("event_date")
            .map_err(|e| decode("event_date", e))?,
        image_url: row
            .try_get::<Option<String>, _>("image_url")
            .map_err(|e| decode("image_url", e))?,
        tier: row
            .try_get::<Option<String>, _>("tier")
            .map_err(|e| decode("tier", e))?,
        created_at: row
            .try_get::<Option<DateTime<Utc>>, _>("created_at")
            .map_err(|e| decode("created_at", e))?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> CatalogError {
    match err {
        sqlx::Error::Database(db_err) => {
            CatalogError::Query(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            CatalogError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => CatalogError::Unavailable(format!("io error in {operation}: {e}")),
        _ => {
            tracing::error!(operation, error = %err, "unexpected sqlx error");
            CatalogError::Query(format!("sqlx error in {operation}: {err}"))
        }
    }
}
