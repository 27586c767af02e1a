use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::stores::NearbyStores;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub location: String,
}

/// GET /api/v1/stores/nearby
pub async fn handle_nearby_stores(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyStores>, AppError> {
    let location = query.location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("Please enter a location".to_string()));
    }

    let maps = state.maps.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Store finder is not configured".to_string())
    })?;

    Ok(Json(maps.find_nearby_stores(location).await?))
}
