use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use pricewatch_market_data::Sample;

use crate::{error::ApiResult, main_lib::AppState};

/// Current quote, or fallback data when the provider fails and the policy allows it.
async fn get_quote(State(state): State<Arc<AppState>>) -> ApiResult<Json<Sample>> {
    let sample = state.quote_service.get_current_quote().await?;
    Ok(Json(sample))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quote", get(get_quote))
}
