//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use garagehub_domain::error::GarageError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`GarageError`] to an HTTP response with appropriate status code.
pub struct ApiError(GarageError);

impl From<GarageError> for ApiError {
    fn from(err: GarageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GarageError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            GarageError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            GarageError::Storage(err) | GarageError::Notification(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garagehub_domain::error::{NotFoundError, ValidationError};

    #[test]
    fn should_map_validation_to_bad_request() {
        let response = ApiError::from(GarageError::from(ValidationError::EmptyName)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = NotFoundError {
            entity: "Accessory",
            id: "attic".to_string(),
        };
        let response = ApiError::from(GarageError::from(err)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_hide_storage_details() {
        let err = GarageError::Storage(Box::new(std::io::Error::other("disk full")));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
