//! SQLite load store using sqlx

use application::{error::ApplicationError, ports::LoadStore};
use async_trait::async_trait;
use domain::{Load, ReferenceNumber};
use tracing::{debug, info, instrument};

use super::{Database, error::map_sqlx_error};

const CREATE_LOADS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS loads (
        reference_number TEXT PRIMARY KEY NOT NULL,
        origin TEXT NOT NULL,
        destination TEXT NOT NULL,
        equipment_type TEXT NOT NULL,
        rate NUMERIC(10, 2) NOT NULL,
        commodity TEXT NOT NULL
    )
";

const UPSERT_LOAD: &str = r"
    INSERT INTO loads (reference_number, origin, destination, equipment_type, rate, commodity)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT(reference_number) DO UPDATE SET
        origin = excluded.origin,
        destination = excluded.destination,
        equipment_type = excluded.equipment_type,
        rate = excluded.rate,
        commodity = excluded.commodity
";

/// Load store backed by the `loads` table
#[derive(Debug, Clone)]
pub struct SqliteLoadStore {
    db: Database,
}

impl SqliteLoadStore {
    /// Create a new load store
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoadStore for SqliteLoadStore {
    #[instrument(skip(self), fields(reference_number = %reference))]
    async fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Option<Load>, ApplicationError> {
        let mut session = self.db.session().await?;

        // NUMERIC affinity stores whole amounts as integers
        let row: Option<LoadRow> = sqlx::query_as(
            r"
            SELECT reference_number, origin, destination, equipment_type,
                   CAST(rate AS REAL) AS rate, commodity
            FROM loads WHERE reference_number = $1
            ",
        )
        .bind(reference.as_str())
        .fetch_optional(&mut *session)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            debug!("Load not found");
            return Ok(None);
        };

        row.into_load().map(Some)
    }

    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), ApplicationError> {
        let mut session = self.db.session().await?;
        sqlx::query(CREATE_LOADS_TABLE)
            .execute(&mut *session)
            .await
            .map_err(map_sqlx_error)?;

        debug!("Loads table ensured");
        Ok(())
    }

    #[instrument(skip(self, loads), fields(rows = loads.len()))]
    async fn upsert_batch(&self, loads: &[Load]) -> Result<usize, ApplicationError> {
        let mut tx = self.db.pool().begin().await.map_err(map_sqlx_error)?;

        for load in loads {
            sqlx::query(UPSERT_LOAD)
                .bind(load.reference_number.as_str())
                .bind(&load.origin)
                .bind(&load.destination)
                .bind(&load.equipment_type)
                .bind(load.rate)
                .bind(&load.commodity)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        // Dropping an uncommitted transaction rolls it back
        tx.commit().await.map_err(map_sqlx_error)?;

        info!(rows = loads.len(), "Load batch committed");
        Ok(loads.len())
    }
}

/// Row type for load queries
#[derive(sqlx::FromRow)]
struct LoadRow {
    reference_number: String,
    origin: String,
    destination: String,
    equipment_type: String,
    rate: f64,
    commodity: String,
}

impl LoadRow {
    fn into_load(self) -> Result<Load, ApplicationError> {
        let invalid =
            |e: domain::DomainError| ApplicationError::Internal(format!("Stored load is invalid: {e}"));

        let reference = ReferenceNumber::parse(&self.reference_number).map_err(invalid)?;
        Load::new(
            reference,
            self.origin,
            self.destination,
            self.equipment_type,
            self.rate,
            self.commodity,
        )
        .map_err(invalid)
    }
}
