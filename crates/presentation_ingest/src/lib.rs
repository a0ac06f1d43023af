//! Freightgate batch ingest entry point
//!
//! Takes an event carrying a base64-encoded CSV of loads, upserts it into
//! the load table in one transaction and answers with a status code and a
//! JSON body, the shape serverless runtimes expect.

use std::{fmt, sync::Arc};

use application::{ApplicationError, IngestReport, IngestService, ports::LoadStore};
use infrastructure::{Database, DatabaseConfig, SqliteLoadStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument};

/// Invocation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestEvent {
    /// Base64-encoded CSV text
    #[serde(default, alias = "body")]
    pub csv_content: Option<String>,
}

impl IngestEvent {
    /// Event carrying the given base64 payload
    pub fn new(csv_content: impl Into<String>) -> Self {
        Self {
            csv_content: Some(csv_content.into()),
        }
    }
}

/// Invocation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON document serialised as a string
    pub body: String,
}

impl IngestResponse {
    fn success(report: IngestReport) -> Self {
        let body = json!({
            "message": format!("Successfully uploaded {} records", report.record_count),
            "record_count": report.record_count,
        });
        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    fn failure(err: &ApplicationError) -> Self {
        let status_code = if err.is_client_error() { 400 } else { 500 };
        error!(status_code, error = %err, "Ingest failed");
        Self {
            status_code,
            body: json!({ "error": err.to_string() }).to_string(),
        }
    }

    /// Whether the batch was committed
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Runs ingest events against a load store
pub struct IngestHandler {
    service: IngestService,
}

impl fmt::Debug for IngestHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestHandler")
            .field("service", &self.service)
            .finish()
    }
}

impl IngestHandler {
    /// Create a handler writing to `store`
    pub fn new(store: Arc<dyn LoadStore>) -> Self {
        Self {
            service: IngestService::new(store),
        }
    }

    /// Ingest one event; failures become a response, never a panic
    #[instrument(skip_all)]
    pub async fn handle(&self, event: &IngestEvent) -> IngestResponse {
        let result = match payload(event) {
            Ok(payload) => self.service.ingest_base64_csv(payload).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => IngestResponse::success(report),
            Err(e) => IngestResponse::failure(&e),
        }
    }
}

fn payload(event: &IngestEvent) -> Result<&str, ApplicationError> {
    event
        .csv_content
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApplicationError::InvalidInput("csv_content is required".to_string()))
}

/// Connect to the configured database and ingest one event
///
/// The connection pool is closed before returning.
pub async fn run_event(event: &IngestEvent, database: Option<&DatabaseConfig>) -> IngestResponse {
    info!("Starting CSV upload");

    if let Err(e) = payload(event) {
        return IngestResponse::failure(&e);
    }

    let Some(config) = database.filter(|c| !c.url.trim().is_empty()) else {
        return IngestResponse::failure(&ApplicationError::Configuration(
            "DATABASE_URL is not set".to_string(),
        ));
    };

    let db = match Database::connect(config).await {
        Ok(db) => db,
        Err(e) => return IngestResponse::failure(&e.into()),
    };

    let response = IngestHandler::new(Arc::new(SqliteLoadStore::new(db.clone())))
        .handle(event)
        .await;
    db.close().await;
    response
}
