use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use seatline_core::{BookingError, RuleViolation, StoreError};

#[derive(Debug)]
pub enum AppError {
    Rule(RuleViolation),
    Store(StoreError),
    UnsupportedMediaType(String),
    InvalidPath(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rule(RuleViolation::InvalidSeat { .. }) => StatusCode::BAD_REQUEST,
            AppError::Rule(RuleViolation::MissingFields) => StatusCode::BAD_REQUEST,
            AppError::Rule(RuleViolation::SeatAlreadyBooked { .. }) => StatusCode::CONFLICT,
            AppError::Rule(RuleViolation::RowRestrictionViolated { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, error_message) = match &self {
            AppError::Rule(violation) => (violation.code(), violation.to_string()),
            AppError::Store(err) => {
                tracing::error!("Store failure: {}", err);
                ("STORE_ERROR", err.to_string())
            }
            AppError::UnsupportedMediaType(msg) => ("UNSUPPORTED_MEDIA_TYPE", msg.clone()),
            AppError::InvalidPath(msg) => ("INVALID_SEAT", msg.clone()),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                ("INTERNAL_ERROR", "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<RuleViolation> for AppError {
    fn from(err: RuleViolation) -> Self {
        Self::Rule(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Rule(v) => Self::Rule(v),
            BookingError::Store(e) => Self::Store(e),
        }
    }
}

/// Malformed or wrongly-typed booking bodies count as missing fields, so
/// every input problem answers 400 with a rule code.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::Rule(RuleViolation::MissingFields)
            }
            JsonRejection::MissingJsonContentType(r) => Self::UnsupportedMediaType(r.body_text()),
            other => Self::Anyhow(anyhow::anyhow!(other.body_text())),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Rule(RuleViolation::InvalidSeat { seat_id: 0, total: 55 }), StatusCode::BAD_REQUEST),
            (AppError::Rule(RuleViolation::MissingFields), StatusCode::BAD_REQUEST),
            (AppError::Rule(RuleViolation::SeatAlreadyBooked { seat_id: 1 }), StatusCode::CONFLICT),
            (
                AppError::Rule(RuleViolation::RowRestrictionViolated { seat_id: 2, through: 20 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Store(StoreError::Unavailable("down".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::UnsupportedMediaType("json only".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (AppError::InvalidPath("not a number".into()), StatusCode::BAD_REQUEST),
            (AppError::Anyhow(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_booking_error_unwraps() {
        let err: AppError = BookingError::Store(StoreError::Conflict { seat_id: 9 }).into();
        assert!(matches!(err, AppError::Store(StoreError::Conflict { seat_id: 9 })));
    }
}
