//! Errors for back-office pages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::BackOfficeError;

/// A page that cannot render at all.
///
/// Form actions that hit a missing record redirect with an error code
/// instead, so only detail and edit pages surface this.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    Store(#[from] BackOfficeError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let Self::Store(error) = self;
        tracing::debug!(%error, "Back-office record missing");
        (StatusCode::NOT_FOUND, format!("Not found: {error}")).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use botanical_core::{OrderId, UserId};

    use super::*;

    #[test]
    fn test_missing_record_is_404() {
        let err = AdminError::from(BackOfficeError::OrderNotFound(OrderId::new(9)));
        assert_eq!(err.to_string(), "order 9 not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AdminError::from(BackOfficeError::UserNotFound(UserId::new(4)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
