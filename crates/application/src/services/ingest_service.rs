//! Batch ingest of load records from base64-encoded CSV

use std::{fmt, sync::Arc};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use domain::{Load, ReferenceNumber};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::LoadStore};

/// Columns a load CSV must carry, exactly once each
pub const CSV_COLUMNS: [&str; 6] = [
    "reference_number",
    "origin",
    "destination",
    "equipment_type",
    "rate",
    "commodity",
];

/// Outcome of a successful ingest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Number of CSV data rows written
    pub record_count: usize,
}

#[derive(Debug, Deserialize)]
struct LoadRow {
    reference_number: String,
    origin: String,
    destination: String,
    equipment_type: String,
    rate: f64,
    commodity: String,
}

/// Decodes CSV payloads and upserts them into the load store
pub struct IngestService {
    store: Arc<dyn LoadStore>,
}

impl fmt::Debug for IngestService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestService").finish_non_exhaustive()
    }
}

impl IngestService {
    /// Create a new ingest service
    pub fn new(store: Arc<dyn LoadStore>) -> Self {
        Self { store }
    }

    /// Decode, validate and upsert a base64-encoded CSV batch
    ///
    /// The whole payload is parsed before the store is touched, and the
    /// store writes it in one transaction, so a bad row leaves the table
    /// unchanged.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub async fn ingest_base64_csv(&self, payload: &str) -> Result<IngestReport, ApplicationError> {
        let text = decode_payload(payload)?;
        let loads = parse_loads(&text)?;
        debug!(rows = loads.len(), "CSV payload parsed");

        self.store.ensure_schema().await?;
        let record_count = self.store.upsert_batch(&loads).await.inspect_err(|e| {
            warn!(error = %e, "Batch upsert failed, nothing committed");
        })?;

        info!(record_count, "Load batch ingested");
        Ok(IngestReport { record_count })
    }
}

/// Base64-decode the payload into UTF-8 text
fn decode_payload(payload: &str) -> Result<String, ApplicationError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(ApplicationError::InvalidInput(
            "CSV payload is empty".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ApplicationError::InvalidInput(format!("Payload is not valid base64: {e}")))?;

    let text = String::from_utf8(bytes)
        .map_err(|e| ApplicationError::InvalidInput(format!("Payload is not UTF-8 text: {e}")))?;

    if text.starts_with('\u{feff}') {
        return Ok(text['\u{feff}'.len_utf8()..].to_string());
    }
    Ok(text)
}

/// Parse CSV text into validated loads
fn parse_loads(text: &str) -> Result<Vec<Load>, ApplicationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ApplicationError::InvalidInput(format!("Failed to read CSV header: {e}")))?
        .clone();
    validate_headers(&headers)?;

    let mut loads = Vec::new();
    for (row_idx, result) in reader.deserialize::<LoadRow>().enumerate() {
        // Header is line 1
        let row_num = row_idx + 2;
        let row = result.map_err(|e| {
            ApplicationError::InvalidInput(format!("Malformed CSV row {row_num}: {e}"))
        })?;
        loads.push(row_to_load(row, row_num)?);
    }

    Ok(loads)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<(), ApplicationError> {
    let mut found: Vec<&str> = headers.iter().collect();
    found.sort_unstable();

    let mut expected = CSV_COLUMNS.to_vec();
    expected.sort_unstable();

    if found != expected {
        return Err(ApplicationError::InvalidInput(format!(
            "CSV header must contain exactly the columns [{}], found [{}]",
            CSV_COLUMNS.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    }

    Ok(())
}

fn row_to_load(row: LoadRow, row_num: usize) -> Result<Load, ApplicationError> {
    let invalid = |e: domain::DomainError| {
        ApplicationError::InvalidInput(format!("Malformed CSV row {row_num}: {e}"))
    };

    let reference = ReferenceNumber::parse(&row.reference_number).map_err(invalid)?;
    Load::new(
        reference,
        row.origin,
        row.destination,
        row.equipment_type,
        row.rate,
        row.commodity,
    )
    .map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockLoadStore;

    const HEADER: &str = "reference_number,origin,destination,equipment_type,rate,commodity";

    fn encode(csv: &str) -> String {
        STANDARD.encode(csv)
    }

    fn accepting_store(expected_rows: usize) -> MockLoadStore {
        let mut store = MockLoadStore::new();
        store.expect_ensure_schema().times(1).returning(|| Ok(()));
        store
            .expect_upsert_batch()
            .withf(move |loads| loads.len() == expected_rows)
            .times(1)
            .returning(|loads| Ok(loads.len()));
        store
    }

    fn untouched_store() -> MockLoadStore {
        let mut store = MockLoadStore::new();
        store.expect_ensure_schema().never();
        store.expect_upsert_batch().never();
        store
    }

    #[tokio::test]
    async fn well_formed_rows_are_counted() {
        let csv = format!(
            "{HEADER}\nLD1001,Chicago IL,Dallas TX,Dry Van,2450.75,Paper\nld1002,Atlanta GA,Miami FL,Reefer,1800,Produce\n"
        );
        let service = IngestService::new(Arc::new(accepting_store(2)));

        let report = service.ingest_base64_csv(&encode(&csv)).await.unwrap();
        assert_eq!(report.record_count, 2);
    }

    #[tokio::test]
    async fn references_are_uppercased_before_storage() {
        let csv = format!("{HEADER}\nld7,A,B,Flatbed,10.5,Steel\n");
        let mut store = MockLoadStore::new();
        store.expect_ensure_schema().returning(|| Ok(()));
        store
            .expect_upsert_batch()
            .withf(|loads| loads[0].reference_number.as_str() == "LD7")
            .returning(|loads| Ok(loads.len()));

        let service = IngestService::new(Arc::new(store));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_ok());
    }

    #[tokio::test]
    async fn padded_cells_are_trimmed_before_validation() {
        let csv = format!("{HEADER}\n  ld8 , A , B ,Van, 12.5 ,Hay\n");
        let mut store = MockLoadStore::new();
        store.expect_ensure_schema().returning(|| Ok(()));
        store
            .expect_upsert_batch()
            .withf(|loads| loads[0].reference_number.as_str() == "LD8" && loads[0].origin == "A")
            .returning(|loads| Ok(loads.len()));

        let service = IngestService::new(Arc::new(store));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_ok());
    }

    #[tokio::test]
    async fn columns_may_appear_in_any_order() {
        let csv = "commodity,rate,equipment_type,destination,origin,reference_number\nSteel,99.5,Flatbed,B,A,LD9\n";
        let service = IngestService::new(Arc::new(accepting_store(1)));

        let report = service.ingest_base64_csv(&encode(csv)).await.unwrap();
        assert_eq!(report.record_count, 1);
    }

    #[tokio::test]
    async fn header_only_ingests_nothing() {
        let service = IngestService::new(Arc::new(accepting_store(0)));
        let report = service.ingest_base64_csv(&encode(HEADER)).await.unwrap();
        assert_eq!(report.record_count, 0);
    }

    #[tokio::test]
    async fn malformed_rate_fails_whole_batch() {
        let csv = format!("{HEADER}\nLD1,A,B,Van,100,Steel\nLD2,A,B,Van,not-a-number,Steel\n");
        let service = IngestService::new(Arc::new(untouched_store()));

        let err = service.ingest_base64_csv(&encode(&csv)).await.unwrap_err();
        let ApplicationError::InvalidInput(msg) = err else {
            unreachable!("Expected InvalidInput");
        };
        assert!(msg.contains("row 3"));
    }

    #[tokio::test]
    async fn short_row_fails_whole_batch() {
        let csv = format!("{HEADER}\nLD1,A,B,Van,100\n");
        let service = IngestService::new(Arc::new(untouched_store()));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_err());
    }

    #[tokio::test]
    async fn empty_field_fails_whole_batch() {
        let csv = format!("{HEADER}\nLD1,,B,Van,100,Steel\n");
        let service = IngestService::new(Arc::new(untouched_store()));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_err());
    }

    #[tokio::test]
    async fn invalid_reference_fails_whole_batch() {
        let csv = format!("{HEADER}\nLD-1,A,B,Van,100,Steel\n");
        let service = IngestService::new(Arc::new(untouched_store()));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_err());
    }

    #[tokio::test]
    async fn unexpected_header_is_rejected() {
        let csv = "reference_number,origin,destination,equipment,rate,commodity\nLD1,A,B,Van,1,Steel\n";
        let service = IngestService::new(Arc::new(untouched_store()));

        let err = service.ingest_base64_csv(&encode(csv)).await.unwrap_err();
        assert!(err.to_string().contains("CSV header"));
    }

    #[tokio::test]
    async fn extra_column_is_rejected() {
        let csv = format!("{HEADER},notes\nLD1,A,B,Van,1,Steel,fragile\n");
        let service = IngestService::new(Arc::new(untouched_store()));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_err());
    }

    #[tokio::test]
    async fn invalid_base64_is_rejected() {
        let service = IngestService::new(Arc::new(untouched_store()));
        let err = service.ingest_base64_csv("%%% not base64 %%%").await.unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let service = IngestService::new(Arc::new(untouched_store()));
        assert!(service.ingest_base64_csv("   ").await.is_err());
    }

    #[tokio::test]
    async fn wrapped_base64_lines_are_accepted() {
        let csv = format!("{HEADER}\nLD1,A,B,Van,1,Steel\n");
        let encoded = encode(&csv);
        let (head, tail) = encoded.split_at(20);
        let wrapped = format!("{head}\n{tail}\n");

        let service = IngestService::new(Arc::new(accepting_store(1)));
        assert!(service.ingest_base64_csv(&wrapped).await.is_ok());
    }

    #[tokio::test]
    async fn byte_order_mark_is_ignored() {
        let csv = format!("\u{feff}{HEADER}\nLD1,A,B,Van,1,Steel\n");
        let service = IngestService::new(Arc::new(accepting_store(1)));
        assert!(service.ingest_base64_csv(&encode(&csv)).await.is_ok());
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let csv = format!("{HEADER}\nLD1,A,B,Van,1,Steel\n");
        let mut store = MockLoadStore::new();
        store.expect_ensure_schema().returning(|| Ok(()));
        store
            .expect_upsert_batch()
            .returning(|_| Err(ApplicationError::Internal("constraint failed".into())));

        let service = IngestService::new(Arc::new(store));
        let err = service.ingest_base64_csv(&encode(&csv)).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}
