use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::middleware::{ApiResult, AuthUser};
use crate::services::{ElectricityReading, ListingUsage, Relayed};
use crate::state::AppState;

/// GET /friend/getListrikRealEstate - listings paired with their readings
pub async fn usage_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<ListingUsage>>> {
    let token = user.secondary_credential()?;
    Ok(Json(state.listrik.usage_by_listing(token).await?))
}

/// POST /friend/post/dataListrik-realEstate
pub async fn reading_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(reading): Json<ElectricityReading>,
) -> ApiResult<Relayed> {
    let token = user.secondary_credential()?;
    Ok(state.listrik.create_reading(token, reading).await?)
}

/// PUT /friend/put/dataListrik-realEstate - target is the body's `username`
pub async fn reading_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(reading): Json<ElectricityReading>,
) -> ApiResult<Relayed> {
    let token = user.secondary_credential()?;
    Ok(state.listrik.update_reading(token, reading).await?)
}

/// DELETE /friend/delete/dataListrik-realEstate/:username
pub async fn reading_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<Relayed> {
    let token = user.secondary_credential()?;
    Ok(state.listrik.delete_reading(token, &username).await?)
}
