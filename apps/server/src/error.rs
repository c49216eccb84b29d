use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricewatch_market_data::MarketDataError;
use pricewatch_notify::NotifyError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Failed to fetch quote: {0}")]
    MarketData(#[from] MarketDataError),
    #[error("Failed to send notification: {0}")]
    Gateway(NotifyError),
    #[error("{0}")]
    Internal(String),
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::Validation(reason) => ApiError::BadRequest(reason),
            other => ApiError::Gateway(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MarketData(_) | ApiError::Gateway(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(NotifyError::Validation("Missing".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_gateway_failure_maps_to_server_error() {
        let err = ApiError::from(NotifyError::Gateway("closed".to_string()));
        assert_eq!(err.to_string(), "Failed to send notification: Push gateway error: closed");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
