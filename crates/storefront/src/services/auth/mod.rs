//! Authentication service.
//!
//! There is no credential store: any well-formed email with a non-empty
//! password signs in. The configured admin email receives the admin role,
//! every other address is a regular user. The issued token is opaque and
//! only marks the session as signed in.

mod error;

pub use error::AuthError;

use botanical_core::{Email, Role, SessionUser, UserId};
use uuid::Uuid;

/// Minimum password length for signup.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Avatar shown for every signed-in account.
pub const DEFAULT_AVATAR: &str =
    "https://img.daisyui.com/images/stock/photo-1534528741775-53994a69daeb.webp";

/// A successful login: the user to store and the token that marks the session.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: SessionUser,
    pub token: String,
}

impl LoginOutcome {
    /// Where the visitor goes after signing in.
    #[must_use]
    pub fn landing_path(&self) -> &'static str {
        if self.user.is_admin() { "/admin" } else { "/" }
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    admin_email: &'a str,
}

impl<'a> AuthService<'a> {
    /// Create a service that grants the admin role to `admin_email`.
    #[must_use]
    pub const fn new(admin_email: &'a str) -> Self {
        Self { admin_email }
    }

    /// Sign in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed address and
    /// `AuthError::MissingPassword` for an empty password.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let user = if email.as_str() == self.admin_email {
            SessionUser {
                id: UserId::new(1),
                email,
                role: Role::Admin,
                name: "Admin User".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
            }
        } else {
            SessionUser {
                id: UserId::new(2),
                email,
                role: Role::User,
                name: "Regular User".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
            }
        };

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "User logged in");

        Ok(LoginOutcome {
            user,
            token: issue_token(),
        })
    }

    /// Create an account and sign it in.
    ///
    /// The display name is taken from the form when given; the role follows
    /// the same rule as [`AuthService::login`].
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed email, a password shorter than
    /// eight characters, or a confirmation that does not match.
    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<LoginOutcome, AuthError> {
        validate_password(password)?;
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let mut outcome = self.login(email, password)?;
        let name = name.trim();
        if !name.is_empty() {
            outcome.user.name = name.to_string();
        }
        Ok(outcome)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Rules a new password must meet on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordRequirements {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_special_char: bool,
}

impl PasswordRequirements {
    #[must_use]
    pub fn check(password: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special_char: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    #[must_use]
    pub const fn is_met(&self) -> bool {
        self.has_min_length
            && self.has_uppercase
            && self.has_lowercase
            && self.has_number
            && self.has_special_char
    }
}

/// Validate a password change.
///
/// Nothing is stored; a valid change is only acknowledged.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` when a rule is not met and
/// `AuthError::PasswordMismatch` when the confirmation differs.
pub fn change_password(new_password: &str, confirm: &str) -> Result<(), AuthError> {
    if !PasswordRequirements::check(new_password).is_met() {
        return Err(AuthError::WeakPassword(
            "Password does not meet the requirements".to_string(),
        ));
    }
    if new_password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    Ok(())
}

fn issue_token() -> String {
    format!("mock-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ADMIN: &str = "admin@example.com";

    #[test]
    fn test_admin_email_gets_admin_role() {
        let outcome = AuthService::new(ADMIN)
            .login("admin@example.com", "anything")
            .unwrap();
        assert_eq!(outcome.user.role, Role::Admin);
        assert_eq!(outcome.user.id, UserId::new(1));
        assert_eq!(outcome.user.name, "Admin User");
        assert_eq!(outcome.landing_path(), "/admin");
    }

    #[test]
    fn test_admin_match_is_exact() {
        let outcome = AuthService::new(ADMIN)
            .login("Admin@Example.com", "pw")
            .unwrap();
        assert!(!outcome.user.is_admin());

        let outcome = AuthService::new(ADMIN)
            .login("  admin@example.com ", "pw")
            .unwrap();
        assert!(outcome.user.is_admin());
    }

    #[test]
    fn test_other_email_gets_user_role() {
        let outcome = AuthService::new(ADMIN)
            .login("jane@example.com", "pw")
            .unwrap();
        assert_eq!(outcome.user.role, Role::User);
        assert_eq!(outcome.user.name, "Regular User");
        assert_eq!(outcome.user.avatar, DEFAULT_AVATAR);
        assert_eq!(outcome.landing_path(), "/");
    }

    #[test]
    fn test_login_issues_fresh_tokens() {
        let service = AuthService::new(ADMIN);
        let a = service.login("jane@example.com", "pw").unwrap();
        let b = service.login("jane@example.com", "pw").unwrap();
        assert!(a.token.starts_with("mock-"));
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_login_rejects_bad_input() {
        let service = AuthService::new(ADMIN);
        assert!(matches!(
            service.login("not-an-email", "pw"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            service.login("jane@example.com", ""),
            Err(AuthError::MissingPassword)
        ));
    }

    #[test]
    fn test_signup_validates_passwords() {
        let service = AuthService::new(ADMIN);
        assert!(matches!(
            service.signup("Jane", "jane@example.com", "short", "short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            service.signup("Jane", "jane@example.com", "long-enough", "different!"),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_password_requirements() {
        let weak = PasswordRequirements::check("password");
        assert!(weak.has_min_length);
        assert!(weak.has_lowercase);
        assert!(!weak.has_uppercase);
        assert!(!weak.is_met());
        assert!(PasswordRequirements::check("Passw0rd!").is_met());
    }

    #[test]
    fn test_change_password() {
        assert!(matches!(
            change_password("password", "password"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            change_password("Passw0rd!", "Passw0rd?"),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(change_password("Passw0rd!", "Passw0rd!").is_ok());
    }

    #[test]
    fn test_signup_uses_given_name() {
        let outcome = AuthService::new(ADMIN)
            .signup(" Jane Smith ", "jane@example.com", "long-enough", "long-enough")
            .unwrap();
        assert_eq!(outcome.user.name, "Jane Smith");
        assert_eq!(outcome.user.role, Role::User);
    }
}
