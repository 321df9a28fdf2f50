use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::{DemographicData, RealEstate};
use crate::middleware::ApiResult;
use crate::state::AppState;

/// GET /getters/realEstate
pub async fn real_estate_list(State(state): State<AppState>) -> Json<Vec<RealEstate>> {
    Json(state.real_estate.select_all().await)
}

/// GET /getters/realEstate/:id
pub async fn real_estate_get(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult<Json<RealEstate>> {
    Ok(Json(state.real_estate.select_404(id).await?))
}

/// GET /getters/demographic
pub async fn demographic_list(State(state): State<AppState>) -> Json<Vec<DemographicData>> {
    Json(state.demographic.select_all().await)
}

/// GET /getters/demographic/:location
pub async fn demographic_get(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> ApiResult<Json<DemographicData>> {
    Ok(Json(state.demographic.select_404(&location).await?))
}
