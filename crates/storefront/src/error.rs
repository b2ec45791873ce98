//! Storefront error type and Sentry helpers.
//!
//! Handlers return [`Result`]; failures that a visitor can fix (bad form
//! input, empty cart) redirect with a message code instead (see
//! [`crate::messages`]) and never reach this type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the visitor's session failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Visitor state could not be serialized into the session.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A path segment named nothing we have.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Catalog(CatalogError::ProductNotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
            return (status, "Internal server error").into_response();
        }

        tracing::debug!(error = %self, "Not found");
        let body = match self {
            Self::Catalog(CatalogError::ProductNotFound(_)) => "Product not found".to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the signed-in visitor to later Sentry events.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| scope.set_user(None));
}

/// Record a visitor action (cart, wishlist, checkout) as a Sentry breadcrumb.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, String)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    breadcrumb.data.extend(
        data.iter()
            .map(|(key, value)| ((*key).to_string(), serde_json::Value::from(value.as_str()))),
    );
    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use botanical_core::ProductId;

    #[test]
    fn test_missing_product_is_404() {
        let err = AppError::from(CatalogError::ProductNotFound(ProductId::new(99)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::NotFound("product abc".to_string());
        assert_eq!(err.to_string(), "Not found: product abc");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_serialization_failure_is_500() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let response = AppError::from(source).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
