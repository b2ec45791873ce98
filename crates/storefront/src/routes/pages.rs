//! Static page route handlers.
//!
//! About, FAQ, and contact pages, the mock contact and newsletter forms,
//! and the 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use botanical_core::Email;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::content::{self, Blurb, FaqSection};
use crate::error::Result;
use crate::filters;
use crate::messages::{self, MessageQuery, safe_return_path};
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub ctx: PageContext,
    pub mission: &'static str,
    pub pillars: [Blurb; 2],
    pub team: [Blurb; 3],
    pub values: [Blurb; 3],
}

/// FAQ page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/faq.html")]
pub struct FaqTemplate {
    pub ctx: PageContext,
    pub sections: [FaqSection; 5],
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Newsletter form data.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
    pub return_to: Option<String>,
}

/// Display the About page.
#[instrument(skip(session, user, query))]
pub async fn about(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<AboutTemplate> {
    Ok(AboutTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
        mission: content::ABOUT_MISSION,
        pillars: content::ABOUT_PILLARS,
        team: content::TEAM,
        values: content::VALUES,
    })
}

/// Display the FAQ page.
#[instrument(skip(session, user, query))]
pub async fn faq(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<FaqTemplate> {
    Ok(FaqTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
        sections: content::FAQ,
    })
}

/// Display the contact page.
#[instrument(skip(session, user, query))]
pub async fn contact(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<ContactTemplate> {
    Ok(ContactTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
    })
}

/// Accept a contact message. Nothing is sent.
#[instrument(skip(form))]
pub async fn submit_contact(Form(form): Form<ContactForm>) -> Redirect {
    if !form.is_complete() {
        return messages::error("/contact", "contact_incomplete");
    }
    if let Err(error) = Email::parse(&form.email) {
        tracing::warn!(%error, "Contact form with invalid email");
        return messages::error("/contact", "invalid_email");
    }

    tracing::info!(subject = %form.subject, "Contact message received");
    messages::success("/contact", "contact_sent")
}

/// Accept a newsletter signup. Nothing is stored.
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<NewsletterForm>) -> Redirect {
    let back = safe_return_path(form.return_to.as_deref(), "/");
    match Email::parse(&form.email) {
        Ok(email) => {
            tracing::info!(domain = email.domain(), "Newsletter signup");
            messages::success(back, "subscribed")
        }
        Err(error) => {
            tracing::warn!(%error, "Newsletter signup rejected");
            messages::error(back, "invalid_email")
        }
    }
}

/// 404 page for any unmatched path.
#[instrument(skip(session, user))]
pub async fn not_found(session: Session, OptionalAuth(user): OptionalAuth) -> Response {
    let ctx = PageContext::load(&session, user, &MessageQuery::default())
        .await
        .unwrap_or_default();
    (StatusCode::NOT_FOUND, NotFoundTemplate { ctx }).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            subject: "Plant care question".to_string(),
            message: "My fern is brown".to_string(),
        }
    }

    #[test]
    fn test_contact_form_requires_every_field() {
        assert!(form("Ana", "ana@example.com").is_complete());
        assert!(!form("  ", "ana@example.com").is_complete());
        assert!(!form("Ana", "").is_complete());
    }
}
