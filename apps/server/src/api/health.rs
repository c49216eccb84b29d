use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LivenessResponse {
    message: String,
    timestamp: DateTime<Utc>,
    started_at: DateTime<Utc>,
}

async fn liveness(State(state): State<Arc<AppState>>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: format!("{} monitor service is running", state.quote_service.symbol()),
        timestamp: Utc::now(),
        started_at: state.started_at,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/test", get(liveness))
}
