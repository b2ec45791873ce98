//! Status enums for orders and accounts.
//!
//! Each enum serializes in lowercase (`"pending"`, `"admin"`, ...) so the
//! same strings work as query-string filter values and form fields.

use serde::{Deserialize, Serialize};

/// Error returned when a status string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownStatus {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($value:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lowercase wire value (query strings, forms, JSON).
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Capitalized label for tables and badges.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownStatus {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

status_enum! {
    /// Order fulfillment status.
    OrderStatus, "order status" {
        Pending => ("pending", "Pending"),
        Processing => ("processing", "Processing"),
        Shipped => ("shipped", "Shipped"),
        Delivered => ("delivered", "Delivered"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

status_enum! {
    /// Order payment status.
    PaymentStatus, "payment status" {
        Paid => ("paid", "Paid"),
        Unpaid => ("unpaid", "Unpaid"),
        Refunded => ("refunded", "Refunded"),
    }
}

status_enum! {
    /// Role of an account in the back office user table.
    AccountRole, "account role" {
        Admin => ("admin", "Admin"),
        Customer => ("customer", "Customer"),
    }
}

status_enum! {
    /// Whether an account may sign in.
    AccountStatus, "account status" {
        Active => ("active", "Active"),
        Inactive => ("inactive", "Inactive"),
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}
