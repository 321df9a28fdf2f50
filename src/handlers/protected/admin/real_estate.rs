use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::database::models::RealEstate;
use crate::middleware::{ApiResult, AuthUser, MessageResponse};
use crate::state::AppState;

/// POST /admin/realEstate - store a listing under the smallest free id
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(listing): Json<RealEstate>,
) -> ApiResult<Json<RealEstate>> {
    user.require_admin("You do not have permission to create a new real estate")?;

    let created = state.real_estate.create(listing).await?;
    tracing::info!("'{}' created real estate {}", user.username, created.id);
    Ok(Json(created))
}

/// PUT /admin/realEstate/:id - replace a listing, keeping its id
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u32>,
    Json(listing): Json<RealEstate>,
) -> ApiResult<Json<RealEstate>> {
    user.require_admin("You do not have permission to update this requirement")?;

    let updated = state.real_estate.update_404(id, listing).await?;
    tracing::info!("'{}' updated real estate {}", user.username, id);
    Ok(Json(updated))
}

/// DELETE /admin/realEstate/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u32>,
) -> ApiResult<MessageResponse> {
    user.require_admin("You do not have permission to delete this requirement")?;

    state.real_estate.delete_404(id).await?;
    tracing::info!("'{}' deleted real estate {}", user.username, id);
    Ok(MessageResponse::new("Real Estate deleted successfully"))
}
