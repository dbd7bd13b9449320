use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::ApiError;
use crate::oauth::TokenInspection;
use crate::services::inspect_token;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenInfoResponse {
    pub success: bool,
    #[serde(flatten)]
    pub inspection: TokenInspection,
}

pub async fn token_info(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<TokenInfoResponse>, ApiError> {
    let inspection = inspect_token(&state.graph, &token).await?;

    Ok(Json(TokenInfoResponse {
        success: true,
        inspection,
    }))
}
