use crate::error::ApiError;
use axum::{extract::rejection::JsonRejection, Json};
use index_fund_core::{AllocationRecord, AllocationRequest};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Computes the allocation table for the posted request.
///
/// # Errors
/// Returns `400` for out-of-range parameters or assets, `422` for a blank
/// symbol, and the extractor's status for a body that is not valid JSON.
pub async fn calculate(
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Result<Json<Vec<AllocationRecord>>, ApiError> {
    let Json(request) = payload?;

    if let Some(index) = request
        .assets
        .iter()
        .position(|asset| asset.symbol.trim().is_empty())
    {
        return Err(ApiError::InvalidRequest(format!(
            "coins[{index}]: symbol must not be empty"
        )));
    }

    let records = request.compute()?;
    tracing::debug!(
        assets = records.len(),
        asset_cap = request.asset_cap,
        total_capital = request.total_capital,
        "Computed allocation"
    );

    Ok(Json(records))
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
