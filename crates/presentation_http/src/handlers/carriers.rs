//! Carrier verification handlers
//!
//! The path and query forms share one core so both behave identically.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::CarrierVerification;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Query string of `GET /verify_carrier/?mc_number=`
#[derive(Debug, Default, Deserialize)]
pub struct VerifyCarrierQuery {
    pub mc_number: Option<String>,
}

/// `GET /verify_carrier/{mc_number}`
pub async fn verify_carrier_by_path(
    State(state): State<AppState>,
    Path(mc_number): Path<String>,
) -> Result<Json<CarrierVerification>, ApiError> {
    verify(&state, Some(&mc_number)).await
}

/// `GET /verify_carrier/?mc_number=`
pub async fn verify_carrier_by_query(
    State(state): State<AppState>,
    Query(query): Query<VerifyCarrierQuery>,
) -> Result<Json<CarrierVerification>, ApiError> {
    verify(&state, query.mc_number.as_deref()).await
}

#[instrument(skip(state))]
async fn verify(
    state: &AppState,
    mc_number: Option<&str>,
) -> Result<Json<CarrierVerification>, ApiError> {
    info!("Received carrier verification request");
    let verification = state.carrier_service.verify(mc_number).await?;
    Ok(Json(verification))
}
