//! One-shot page messages carried on redirects.
//!
//! Form handlers redirect back with `?success=<code>` or `?error=<code>`
//! (plus an optional `item` name). The target page maps the code to text
//! once; unknown codes are ignored so arbitrary text never reaches a page.

use axum::response::Redirect;
use serde::Deserialize;

/// Whether a message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-error",
        }
    }

    const fn param(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Query string parameters for page messages.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub item: Option<String>,
}

impl MessageQuery {
    /// The message to show, if the query carries a known code.
    ///
    /// An error wins over a success when both are present.
    #[must_use]
    pub fn message(&self) -> Option<Message> {
        let item = self.item.as_deref().filter(|i| !i.trim().is_empty());
        if let Some(message) = self.error.as_deref().and_then(error_text) {
            return Some(message);
        }
        self.success
            .as_deref()
            .and_then(|c| success_text(c, item))
            .map(|text| Message {
                kind: MessageKind::Success,
                text,
            })
    }
}

fn success_text(code: &str, item: Option<&str>) -> Option<String> {
    let text = match (code, item) {
        ("cart_added", Some(name)) => format!("{name} has been added to cart!"),
        ("cart_added", None) => "Item has been added to cart!".to_string(),
        ("cart_removed", Some(name)) => format!("Removed {name} from cart"),
        ("cart_removed", None) => "Item removed from cart".to_string(),
        ("wishlist_added", Some(name)) => format!("{name} has been added to wishlist!"),
        ("wishlist_added", None) => "Plant added to wishlist successfully".to_string(),
        ("wishlist_removed", Some(name)) => format!("{name} has been removed from wishlist!"),
        ("wishlist_removed", None) => "Plant removed from wishlist".to_string(),
        _ => return fixed_success_text(code).map(str::to_string),
    };
    Some(text)
}

fn fixed_success_text(code: &str) -> Option<&'static str> {
    Some(match code {
        "cart_updated" => "Cart updated",
        "wishlist_cleared" => "Wishlist cleared",
        "logged_in" => "Welcome back!",
        "logged_out" => "You have been signed out",
        "signed_up" => "Account created successfully",
        "contact_sent" => "Thank you! Your message has been sent.",
        "subscribed" => "Thank you for subscribing to our newsletter!",
        "review_submitted" => "Review submitted successfully",
        "address_default" => "Default delivery address updated",
        "address_removed" => "Address removed successfully",
        "payment_default" => "Default payment method updated",
        "payment_removed" => "Payment method removed successfully",
        "setting_updated" => "Setting updated successfully",
        "password_changed" => "Password changed successfully",
        _ => return None,
    })
}

fn error_text(code: &str) -> Option<Message> {
    let text = match code {
        "quantity_min" => "Minimum quantity is 1",
        "quantity_low" => "Quantity cannot be less than 1",
        "exceeds_stock" => "Cannot exceed available stock",
        "select_variant" => "Please select size and pot style",
        "variant_unavailable" => "Selected variant not available",
        "cart_add_failed" => "Error adding to cart",
        "cart_empty" => "Your cart is empty",
        "not_in_cart" => "That item is no longer in your cart",
        "wishlist_failed" => "Failed to update wishlist",
        "product_not_found" => "Product not found",
        "login_required" => "Please sign in to continue",
        "invalid_email" => "Please enter a valid email address",
        "missing_password" => "Please enter your password",
        "weak_password" => "Password must be at least 8 characters",
        "password_mismatch" => "Passwords do not match",
        "password_requirements" => "Password does not meet the requirements",
        "new_password_mismatch" => "New passwords do not match",
        "address_is_default" => "Cannot delete default address",
        "payment_is_default" => "Cannot delete default payment method",
        "account_not_found" => "That entry no longer exists",
        "unknown_setting" => "Unknown setting",
        "contact_incomplete" => "Please fill in all fields",
        "review_incomplete" => "Please write a comment before submitting",
        _ => return None,
    };
    Some(Message {
        kind: MessageKind::Error,
        text: text.to_string(),
    })
}

/// Redirect to `path` with a message code.
///
/// Any query already on `path` is kept, minus a previous message.
#[must_use]
pub fn redirect_with(path: &str, kind: MessageKind, code: &str, item: Option<&str>) -> Redirect {
    let (path, fragment) = path
        .split_once('#')
        .map_or((path, None), |(p, f)| (p, Some(f)));
    let (base, existing) = path.split_once('?').unwrap_or((path, ""));
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(existing.as_bytes()) {
        if !matches!(key.as_ref(), "success" | "error" | "item") {
            query.append_pair(&key, &value);
        }
    }
    query.append_pair(kind.param(), code);
    if let Some(item) = item {
        query.append_pair("item", item);
    }
    let mut target = format!("{base}?{}", query.finish());
    if let Some(fragment) = fragment {
        target.push('#');
        target.push_str(fragment);
    }
    Redirect::to(&target)
}

/// Redirect with a success code.
#[must_use]
pub fn success(path: &str, code: &str) -> Redirect {
    redirect_with(path, MessageKind::Success, code, None)
}

/// Redirect with an error code.
#[must_use]
pub fn error(path: &str, code: &str) -> Redirect {
    redirect_with(path, MessageKind::Error, code, None)
}

/// Keep only same-site paths from a `return_to` form field.
///
/// Anything that is not a local absolute path falls back to `default`.
/// Browsers read `//host` and `/\host` as another site, so a second
/// character of `/` or `\` is refused, encoded or not.
#[must_use]
pub fn safe_return_path<'a>(return_to: Option<&'a str>, default: &'a str) -> &'a str {
    match return_to {
        Some(path) if is_local_path(path) => path,
        _ => default,
    }
}

fn is_local_path(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    if rest.starts_with(['/', '\\']) || path.chars().any(char::is_control) {
        return false;
    }
    let lead = rest.get(..3).map(str::to_ascii_uppercase);
    !matches!(lead.as_deref(), Some("%2F" | "%5C"))
}
