//! Admin-role gate for back-office handlers.
//!
//! The back office shares the storefront session: a visitor is let in when
//! the session holds the login token and a readable [`SessionUser`] with
//! the admin role. Everyone else is sent to the storefront login page.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use botanical_core::{SessionUser, session::keys};
use tower_sessions::Session;

/// Login page that anonymous visitors and non-admins are redirected to.
pub const LOGIN_PATH: &str = "/login?error=login_required";

/// Extractor that requires a signed-in admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub SessionUser);

/// Error returned when the visitor may not enter the back office.
#[derive(Debug)]
pub enum AdminRejection {
    /// Not signed in, or signed in without the admin role.
    RedirectToLogin,
    /// No session layer in front of the handler.
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthorized)?;

        match session_admin(session).await {
            Some(admin) => Ok(Self(admin)),
            None => {
                tracing::debug!(path = %parts.uri.path(), "Back office access denied");
                Err(AdminRejection::RedirectToLogin)
            }
        }
    }
}

/// The signed-in user, when the session holds a token and an admin user.
pub async fn session_admin(session: &Session) -> Option<SessionUser> {
    let token = session.get::<String>(keys::TOKEN).await.ok().flatten()?;
    if token.is_empty() {
        return None;
    }
    session
        .get::<SessionUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .filter(SessionUser::is_admin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use botanical_core::{Email, Role, UserId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: UserId::new(1),
            email: Email::parse("admin@example.com").unwrap(),
            role,
            name: "Admin User".to_string(),
            avatar: String::new(),
        }
    }

    #[tokio::test]
    async fn test_admin_with_token_is_let_in() {
        let session = session();
        session.insert(keys::TOKEN, "mock-token").await.unwrap();
        session
            .insert(keys::CURRENT_USER, user(Role::Admin))
            .await
            .unwrap();
        assert_eq!(session_admin(&session).await, Some(user(Role::Admin)));
    }

    #[tokio::test]
    async fn test_regular_user_is_refused() {
        let session = session();
        session.insert(keys::TOKEN, "mock-token").await.unwrap();
        session
            .insert(keys::CURRENT_USER, user(Role::User))
            .await
            .unwrap();
        assert_eq!(session_admin(&session).await, None);
    }

    #[tokio::test]
    async fn test_admin_without_token_is_refused() {
        let session = session();
        session
            .insert(keys::CURRENT_USER, user(Role::Admin))
            .await
            .unwrap();
        assert_eq!(session_admin(&session).await, None);
    }

    #[test]
    fn test_rejection_redirects_to_login() {
        let response = AdminRejection::RedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), LOGIN_PATH);
    }
}
