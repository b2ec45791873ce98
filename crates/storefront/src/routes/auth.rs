//! Authentication route handlers.
//!
//! Handles mock login, signup, and logout. Any well-formed email with a
//! password signs in; see [`crate::services::auth`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::messages::{self, MessageKind, MessageQuery};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::routes::PageContext;
use crate::services::auth::{AuthError, AuthService, LoginOutcome};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub ctx: PageContext,
}

/// Message code for a rejected login or signup.
const fn error_code(error: &AuthError) -> &'static str {
    match error {
        AuthError::InvalidEmail(_) => "invalid_email",
        AuthError::MissingPassword => "missing_password",
        AuthError::WeakPassword(_) => "weak_password",
        AuthError::PasswordMismatch => "password_mismatch",
    }
}

/// Store the signed-in user and send them to their landing page.
async fn sign_in(session: &Session, outcome: &LoginOutcome, code: &str) -> Result<Redirect> {
    set_current_user(session, &outcome.user, &outcome.token).await?;
    set_sentry_user(&outcome.user.id, Some(outcome.user.email.as_str()));
    Ok(messages::redirect_with(
        outcome.landing_path(),
        MessageKind::Success,
        code,
        None,
    ))
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(session, user, query))]
pub async fn login_page(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<LoginTemplate> {
    Ok(LoginTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
    })
}

/// Handle login form submission.
///
/// Admins land on the back office, everyone else on the home page.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let service = AuthService::new(&state.config().admin_email);
    match service.login(&form.email, form.password.expose_secret()) {
        Ok(outcome) => sign_in(&session, &outcome, "logged_in").await,
        Err(error) => {
            tracing::warn!(%error, "Login rejected");
            Ok(messages::error("/login", error_code(&error)))
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
#[instrument(skip(session, user, query))]
pub async fn signup_page(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<SignupTemplate> {
    Ok(SignupTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
    })
}

/// Handle signup form submission. A valid signup signs the visitor in.
#[instrument(skip(state, session, form))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let service = AuthService::new(&state.config().admin_email);
    match service.signup(
        &form.name,
        &form.email,
        form.password.expose_secret(),
        form.password_confirm.expose_secret(),
    ) {
        Ok(outcome) => sign_in(&session, &outcome, "signed_up").await,
        Err(error) => {
            tracing::warn!(%error, "Signup rejected");
            Ok(messages::error("/signup", error_code(&error)))
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out. The cart and wishlist stay in the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");
    Ok(messages::success("/", "logged_out"))
}

#[cfg(test)]
mod tests {
    use botanical_core::EmailError;

    use super::*;

    #[test]
    fn test_auth_errors_map_to_known_messages() {
        for error in [
            AuthError::InvalidEmail(EmailError::Empty),
            AuthError::MissingPassword,
            AuthError::WeakPassword("too short".to_string()),
            AuthError::PasswordMismatch,
        ] {
            let query = MessageQuery {
                error: Some(error_code(&error).to_string()),
                ..MessageQuery::default()
            };
            assert!(query.message().is_some(), "{error:?}");
        }
    }
}
