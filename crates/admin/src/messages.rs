//! One-shot back-office messages carried on redirects.
//!
//! Every manager action redirects back to its list with `?success=<code>`
//! or `?error=<code>`, plus the record name (`item`), the new order status
//! (`new_status`) or an update count (`count`) where the text needs one. Unknown
//! codes render nothing.

use std::str::FromStr;

use axum::response::Redirect;
use botanical_core::OrderStatus;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Query string parameters for back-office messages.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub item: Option<String>,
    pub new_status: Option<String>,
    pub count: Option<String>,
}

impl MessageQuery {
    /// The message to show, if the query carries a known code.
    #[must_use]
    pub fn message(&self) -> Option<Message> {
        if let Some(text) = self.error.as_deref().and_then(error_text) {
            return Some(Message {
                kind: MessageKind::Error,
                text: text.to_string(),
            });
        }
        self.success
            .as_deref()
            .and_then(|code| self.success_text(code))
            .map(|text| Message {
                kind: MessageKind::Success,
                text,
            })
    }

    fn success_text(&self, code: &str) -> Option<String> {
        let item = self.item.as_deref().map(str::trim).filter(|i| !i.is_empty());
        let status = self
            .new_status
            .as_deref()
            .and_then(|s| OrderStatus::from_str(s).ok());
        let count = self.count.as_deref().and_then(|c| c.parse::<usize>().ok());

        let text = match (code, item) {
            ("order_status_updated", Some(number)) => {
                format!("Order #{number} status updated to {}", status?.as_str())
            }
            ("orders_bulk_updated", _) => {
                format!("{} orders updated to status: {}", count?, status?.as_str())
            }
            ("user_updated", Some(name)) => format!("User {name} updated successfully"),
            ("user_deleted", Some(name)) => format!("User {name} deleted successfully"),
            ("shipping_deleted", Some(name)) => {
                format!("Shipping method {name} deleted successfully")
            }
            ("gateway_deleted", Some(name)) => {
                format!("Payment gateway {name} deleted successfully")
            }
            ("gateway_enabled", Some(name)) => format!("{name} enabled successfully"),
            ("gateway_disabled", Some(name)) => format!("{name} disabled successfully"),
            _ => return fixed_success_text(code).map(str::to_string),
        };
        Some(text)
    }
}

fn fixed_success_text(code: &str) -> Option<&'static str> {
    Some(match code {
        "product_added" => "Product added successfully",
        "product_updated" => "Product updated successfully",
        "product_deleted" => "Product deleted successfully",
        "general_updated" => "General settings updated successfully",
        "shipping_added" => "Shipping method added successfully",
        "shipping_updated" => "Shipping method updated successfully",
        "gateway_added" => "Payment gateway added successfully",
        "gateway_updated" => "Payment gateway updated successfully",
        _ => return None,
    })
}

fn error_text(code: &str) -> Option<&'static str> {
    Some(match code {
        "product_not_found" => "That product no longer exists",
        "order_not_found" => "That order no longer exists",
        "user_not_found" => "That user no longer exists",
        "shipping_not_found" => "That shipping method no longer exists",
        "gateway_not_found" => "That payment gateway no longer exists",
        "no_orders_selected" => "Please select at least one order",
        "invalid_status" => "Please choose a valid status",
        "store_name_required" => "Store name is required",
        "unknown_currency" => "Please choose a supported currency",
        "invalid_tax_rate" => "Tax rate must be between 0 and 100",
        "name_required" => "Name is required",
        "invalid_price" => "Price must be a non-negative number",
        "delivery_required" => "Estimated delivery is required",
        "status_update_failed" => "Failed to update order status. Please try again.",
        _ => return None,
    })
}

/// Redirect to `path` with a message code and its parameters.
///
/// Any query already on `path` is kept, minus a previous message.
#[must_use]
pub fn redirect_with(
    path: &str,
    kind: MessageKind,
    code: &str,
    params: &[(&str, String)],
) -> Redirect {
    let (base, existing) = path.split_once('?').unwrap_or((path, ""));
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(existing.as_bytes()) {
        if !matches!(
            key.as_ref(),
            "success" | "error" | "item" | "new_status" | "count"
        ) {
            query.append_pair(&key, &value);
        }
    }
    query.append_pair(kind.param(), code);
    for (key, value) in params {
        query.append_pair(key, value);
    }
    Redirect::to(&format!("{base}?{}", query.finish()))
}

#[must_use]
pub fn success(path: &str, code: &str) -> Redirect {
    redirect_with(path, MessageKind::Success, code, &[])
}

/// Success naming the affected record.
#[must_use]
pub fn success_item(path: &str, code: &str, item: &str) -> Redirect {
    redirect_with(path, MessageKind::Success, code, &[("item", item.to_string())])
}

#[must_use]
pub fn error(path: &str, code: &str) -> Redirect {
    redirect_with(path, MessageKind::Error, code, &[])
}

/// Keep only back-office paths from a `return_to` form field.
#[must_use]
pub fn safe_return_path<'a>(return_to: &'a str, default: &'a str) -> &'a str {
    if return_to.starts_with("/admin") && !return_to.chars().any(char::is_control) {
        return_to
    } else {
        default
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    fn location(redirect: Redirect) -> String {
        redirect
            .into_response()
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    fn query(pairs: &[(&str, &str)]) -> MessageQuery {
        let mut query = MessageQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "success" => query.success = value,
                "error" => query.error = value,
                "item" => query.item = value,
                "new_status" => query.new_status = value,
                "count" => query.count = value,
                _ => {}
            }
        }
        query
    }

    #[test]
    fn test_order_status_message() {
        let message = query(&[
            ("success", "order_status_updated"),
            ("item", "ORD-2023-001"),
            ("new_status", "shipped"),
        ])
        .message()
        .unwrap();
        assert_eq!(message.text, "Order #ORD-2023-001 status updated to shipped");
    }

    #[test]
    fn test_bulk_message_needs_count_and_status() {
        let message = query(&[
            ("success", "orders_bulk_updated"),
            ("count", "3"),
            ("new_status", "delivered"),
        ])
        .message()
        .unwrap();
        assert_eq!(message.text, "3 orders updated to status: delivered");

        assert!(
            query(&[("success", "orders_bulk_updated"), ("count", "3")])
                .message()
                .is_none()
        );
        assert!(
            query(&[
                ("success", "orders_bulk_updated"),
                ("count", "3"),
                ("new_status", "<b>lost</b>")
            ])
            .message()
            .is_none()
        );
    }

    #[test]
    fn test_named_messages() {
        let message = query(&[("success", "gateway_disabled"), ("item", "PayPal")])
            .message()
            .unwrap();
        assert_eq!(message.text, "PayPal disabled successfully");

        let message = query(&[("success", "user_deleted"), ("item", "Jane Smith")])
            .message()
            .unwrap();
        assert_eq!(message.text, "User Jane Smith deleted successfully");
    }

    #[test]
    fn test_error_wins_and_unknown_codes_are_ignored() {
        let message = query(&[("success", "product_added"), ("error", "invalid_tax_rate")])
            .message()
            .unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(query(&[("success", "pwned")]).message().is_none());
    }

    #[test]
    fn test_redirect_replaces_previous_message() {
        let redirect = redirect_with(
            "/admin/orders?status=pending&success=orders_bulk_updated&count=2",
            MessageKind::Success,
            "orders_bulk_updated",
            &[("count", "1".to_string()), ("new_status", "shipped".to_string())],
        );
        assert_eq!(
            location(redirect),
            "/admin/orders?status=pending&success=orders_bulk_updated&count=1&new_status=shipped"
        );
    }

    #[test]
    fn test_success_item_encodes_name() {
        assert_eq!(
            location(success_item("/admin/users", "user_updated", "Jane & Co")),
            "/admin/users?success=user_updated&item=Jane+%26+Co"
        );
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(
            safe_return_path("/admin/orders?page=2", "/admin/orders"),
            "/admin/orders?page=2"
        );
        assert_eq!(safe_return_path("/cart", "/admin/orders"), "/admin/orders");
        assert_eq!(safe_return_path("", "/admin/orders"), "/admin/orders");
        assert_eq!(safe_return_path("/\\evil.example", "/admin/orders"), "/admin/orders");
        assert_eq!(
            safe_return_path("/admin/orders\r\nSet-Cookie: x", "/admin/orders"),
            "/admin/orders"
        );
    }
}
