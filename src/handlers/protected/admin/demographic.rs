use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::database::models::DemographicData;
use crate::middleware::{ApiResult, AuthUser, MessageResponse};
use crate::state::AppState;

/// POST /admin/demographic - 409 when the location is already recorded
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(record): Json<DemographicData>,
) -> ApiResult<Json<DemographicData>> {
    user.require_admin("You do not have permission to create a new demographic data")?;

    let created = state.demographic.create(record).await?;
    tracing::info!("'{}' created demographic data for {}", user.username, created.location);
    Ok(Json(created))
}

/// PUT /admin/demographic/:location
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(location): Path<String>,
    Json(record): Json<DemographicData>,
) -> ApiResult<Json<DemographicData>> {
    user.require_admin("You do not have permission to update this requirement")?;

    let updated = state.demographic.update_404(&location, record).await?;
    tracing::info!("'{}' updated demographic data for {}", user.username, location);
    Ok(Json(updated))
}

/// DELETE /admin/demographic/:location
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(location): Path<String>,
) -> ApiResult<MessageResponse> {
    user.require_admin("You do not have permission to delete this requirement")?;

    state.demographic.delete_404(&location).await?;
    tracing::info!("'{}' deleted demographic data for {}", user.username, location);
    Ok(MessageResponse::new("Demographic Data deleted successfully"))
}
