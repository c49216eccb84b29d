use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use pricewatch_notify::Notification;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Forward a notification to the push gateway and relay its answer as-is.
async fn send_alert(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Response> {
    let notification = parse_notification(&body)?.validate()?;

    let answer = state.push_gateway.send(&notification).await.map_err(|e| {
        tracing::error!("Push gateway send failed: {}", e);
        ApiError::from(e)
    })?;
    tracing::info!("Push gateway answered {}", answer.status);

    let status = StatusCode::from_u16(answer.status)
        .map_err(|_| ApiError::Internal(format!("Invalid gateway status {}", answer.status)))?;
    let mut response = (status, answer.body).into_response();
    response.headers_mut().remove(CONTENT_TYPE);
    if let Some(value) = answer
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    Ok(response)
}

/// An empty body is an empty notification, so it fails validation like
/// missing fields do.
fn parse_notification(body: &[u8]) -> ApiResult<Notification> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Notification::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/send-alert", post(send_alert))
}
