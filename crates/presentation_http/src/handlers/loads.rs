//! Load lookup handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::Load;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query string of `GET /loads/?reference_number=`
#[derive(Debug, Default, Deserialize)]
pub struct LoadQuery {
    pub reference_number: Option<String>,
}

/// `GET /loads/{reference_number}`
pub async fn get_load_by_path(
    State(state): State<AppState>,
    Path(reference_number): Path<String>,
) -> Result<Json<Load>, ApiError> {
    get_load(&state, Some(&reference_number)).await
}

/// `GET /loads/?reference_number=`
pub async fn get_load_by_query(
    State(state): State<AppState>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<Load>, ApiError> {
    get_load(&state, query.reference_number.as_deref()).await
}

#[instrument(skip(state))]
async fn get_load(
    state: &AppState,
    reference_number: Option<&str>,
) -> Result<Json<Load>, ApiError> {
    let load = state.load_service.get_load(reference_number).await?;
    Ok(Json(load))
}
