//! Authentication extractors.
//!
//! A session counts as signed in when it holds both the login token and a
//! readable [`SessionUser`]. A token left without a user is discarded on
//! the next request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use botanical_core::{SessionUser, session::keys};
use tower_sessions::Session;

/// Extractor that requires a signed-in visitor.
///
/// If nobody is signed in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub SessionUser);

/// Error returned when authentication is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// No session layer in front of the handler.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login?error=login_required").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        signed_in_user(session)
            .await
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

/// Extractor that optionally gets the signed-in visitor.
///
/// Unlike `RequireAuth`, this does not reject anonymous requests.
pub struct OptionalAuth(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => signed_in_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Restore the signed-in user from the session.
///
/// Both the token and the user must be present. A token whose user is
/// missing or unreadable is removed.
pub async fn signed_in_user(session: &Session) -> Option<SessionUser> {
    let token = session.get::<String>(keys::TOKEN).await.ok().flatten()?;
    match session.get::<SessionUser>(keys::CURRENT_USER).await {
        Ok(Some(user)) if !token.is_empty() => Some(user),
        Ok(_) | Err(_) => {
            tracing::warn!("Discarding login token without a readable user");
            if let Err(error) = clear_current_user(session).await {
                tracing::warn!(%error, "Could not clear stale login");
            }
            None
        }
    }
}

/// Store the signed-in user and token (login).
///
/// The session id is rotated first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &SessionUser,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::TOKEN, token).await?;
    session.insert(keys::CURRENT_USER, user).await
}

/// Clear the signed-in user and token (logout). Cart and wishlist stay.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove_value(keys::TOKEN).await?;
    session.remove_value(keys::CURRENT_USER).await?;
    Ok(())
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

    fn user() -> SessionUser {
        SessionUser {
            id: UserId::new(2),
            email: Email::parse("jane@example.com").unwrap(),
            role: Role::User,
            name: "Regular User".to_string(),
            avatar: String::new(),
        }
    }

    #[tokio::test]
    async fn test_login_then_restore() {
        let session = session();
        set_current_user(&session, &user(), "mock-abc").await.unwrap();
        assert_eq!(signed_in_user(&session).await, Some(user()));
    }

    #[tokio::test]
    async fn test_user_without_token_is_anonymous() {
        let session = session();
        session.insert(keys::CURRENT_USER, user()).await.unwrap();
        assert_eq!(signed_in_user(&session).await, None);
    }

    #[tokio::test]
    async fn test_token_without_user_is_discarded() {
        let session = session();
        session.insert(keys::TOKEN, "mock-abc").await.unwrap();
        assert_eq!(signed_in_user(&session).await, None);
        assert_eq!(session.get::<String>(keys::TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_user_is_discarded() {
        let session = session();
        session.insert(keys::TOKEN, "mock-abc").await.unwrap();
        session
            .insert(keys::CURRENT_USER, "not a user")
            .await
            .unwrap();
        assert_eq!(signed_in_user(&session).await, None);
        assert_eq!(session.get::<String>(keys::TOKEN).await.unwrap(), None);
        assert_eq!(
            session.get::<String>(keys::CURRENT_USER).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_logout_keeps_cart() {
        let session = session();
        set_current_user(&session, &user(), "mock-abc").await.unwrap();
        session.insert(keys::CART, 3_u32).await.unwrap();

        clear_current_user(&session).await.unwrap();

        assert_eq!(signed_in_user(&session).await, None);
        assert_eq!(session.get::<u32>(keys::CART).await.unwrap(), Some(3));
    }
}
