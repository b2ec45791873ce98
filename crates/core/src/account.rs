//! Saved addresses, payment methods, and preferences for the profile pages.
//!
//! An [`AccountBook`] is stored in the visitor's session next to the cart.
//! Exactly one address and one payment method carry the default flag while
//! the lists are non-empty, and the default entry cannot be removed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{AddressId, PaymentMethodId};

/// Errors from account book operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("address {0} not found")]
    AddressNotFound(AddressId),
    #[error("payment method {0} not found")]
    PaymentMethodNotFound(PaymentMethodId),
    #[error("cannot delete default address")]
    DefaultAddress,
    #[error("cannot delete default payment method")]
    DefaultPaymentMethod,
    #[error("unknown preference: {0}")]
    UnknownPreference(String),
}

/// A delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    /// Label such as "Home" or "Office".
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_default: bool,
}

/// A saved card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub card_type: String,
    pub last_four: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub is_default: bool,
}

/// Account preference switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    EmailNotifications,
    SmsNotifications,
    TwoFactorAuth,
    SavePaymentInfo,
    DarkMode,
    AutoLogin,
}

impl Preference {
    pub const ALL: [Self; 6] = [
        Self::EmailNotifications,
        Self::SmsNotifications,
        Self::TwoFactorAuth,
        Self::SavePaymentInfo,
        Self::DarkMode,
        Self::AutoLogin,
    ];

    /// Form value.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::EmailNotifications => "email_notifications",
            Self::SmsNotifications => "sms_notifications",
            Self::TwoFactorAuth => "two_factor_auth",
            Self::SavePaymentInfo => "save_payment_info",
            Self::DarkMode => "dark_mode",
            Self::AutoLogin => "auto_login",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EmailNotifications => "Email notifications",
            Self::SmsNotifications => "SMS notifications",
            Self::TwoFactorAuth => "Two-factor authentication",
            Self::SavePaymentInfo => "Save payment information",
            Self::DarkMode => "Dark mode",
            Self::AutoLogin => "Stay signed in",
        }
    }
}

impl FromStr for Preference {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| AccountError::UnknownPreference(s.to_string()))
    }
}

/// Preference values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Preferences {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub two_factor_auth: bool,
    pub save_payment_info: bool,
    pub dark_mode: bool,
    pub auto_login: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            two_factor_auth: false,
            save_payment_info: true,
            dark_mode: false,
            auto_login: true,
        }
    }
}

impl Preferences {
    #[must_use]
    pub const fn get(&self, preference: Preference) -> bool {
        match preference {
            Preference::EmailNotifications => self.email_notifications,
            Preference::SmsNotifications => self.sms_notifications,
            Preference::TwoFactorAuth => self.two_factor_auth,
            Preference::SavePaymentInfo => self.save_payment_info,
            Preference::DarkMode => self.dark_mode,
            Preference::AutoLogin => self.auto_login,
        }
    }

    /// Flip a switch, returning its new value.
    pub fn toggle(&mut self, preference: Preference) -> bool {
        let slot = match preference {
            Preference::EmailNotifications => &mut self.email_notifications,
            Preference::SmsNotifications => &mut self.sms_notifications,
            Preference::TwoFactorAuth => &mut self.two_factor_auth,
            Preference::SavePaymentInfo => &mut self.save_payment_info,
            Preference::DarkMode => &mut self.dark_mode,
            Preference::AutoLogin => &mut self.auto_login,
        };
        *slot = !*slot;
        *slot
    }
}

/// Everything the profile pages let a visitor manage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBook {
    pub addresses: Vec<Address>,
    pub payment_methods: Vec<PaymentMethod>,
    pub preferences: Preferences,
}

impl AccountBook {
    /// Make `id` the only default address.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AddressNotFound` if no address has that id.
    pub fn set_default_address(&mut self, id: AddressId) -> Result<(), AccountError> {
        if !self.addresses.iter().any(|a| a.id == id) {
            return Err(AccountError::AddressNotFound(id));
        }
        for address in &mut self.addresses {
            address.is_default = address.id == id;
        }
        Ok(())
    }

    /// Remove a non-default address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not exist or is the default.
    pub fn remove_address(&mut self, id: AddressId) -> Result<Address, AccountError> {
        let position = self
            .addresses
            .iter()
            .position(|a| a.id == id)
            .ok_or(AccountError::AddressNotFound(id))?;
        if self.addresses.get(position).is_some_and(|a| a.is_default) {
            return Err(AccountError::DefaultAddress);
        }
        Ok(self.addresses.remove(position))
    }

    /// Make `id` the only default payment method.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::PaymentMethodNotFound` if no card has that id.
    pub fn set_default_payment_method(&mut self, id: PaymentMethodId) -> Result<(), AccountError> {
        if !self.payment_methods.iter().any(|m| m.id == id) {
            return Err(AccountError::PaymentMethodNotFound(id));
        }
        for method in &mut self.payment_methods {
            method.is_default = method.id == id;
        }
        Ok(())
    }

    /// Remove a non-default payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist or is the default.
    pub fn remove_payment_method(
        &mut self,
        id: PaymentMethodId,
    ) -> Result<PaymentMethod, AccountError> {
        let position = self
            .payment_methods
            .iter()
            .position(|m| m.id == id)
            .ok_or(AccountError::PaymentMethodNotFound(id))?;
        if self.payment_methods.get(position).is_some_and(|m| m.is_default) {
            return Err(AccountError::DefaultPaymentMethod);
        }
        Ok(self.payment_methods.remove(position))
    }

    /// The default address, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address(id: i32, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            name: format!("Address {id}"),
            street: "1 Street".to_string(),
            city: "Bucharest".to_string(),
            state: "Sector 1".to_string(),
            zip_code: "012345".to_string(),
            is_default,
        }
    }

    fn card(id: i32, is_default: bool) -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::new(id),
            card_type: "Visa".to_string(),
            last_four: "4242".to_string(),
            expiry_date: "12/25".to_string(),
            is_default,
        }
    }

    fn book() -> AccountBook {
        AccountBook {
            addresses: vec![address(1, true), address(2, false)],
            payment_methods: vec![card(1, true), card(2, false)],
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_set_default_address_is_exclusive() {
        let mut book = book();
        book.set_default_address(AddressId::new(2)).unwrap();
        let defaults: Vec<_> = book.addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(book.default_address().unwrap().id, AddressId::new(2));
    }

    #[test]
    fn test_set_default_unknown_address() {
        let mut book = book();
        assert_eq!(
            book.set_default_address(AddressId::new(9)),
            Err(AccountError::AddressNotFound(AddressId::new(9)))
        );
        assert_eq!(book.default_address().unwrap().id, AddressId::new(1));
    }

    #[test]
    fn test_cannot_remove_default_address() {
        let mut book = book();
        assert_eq!(
            book.remove_address(AddressId::new(1)),
            Err(AccountError::DefaultAddress)
        );
        let removed = book.remove_address(AddressId::new(2)).unwrap();
        assert_eq!(removed.name, "Address 2");
        assert_eq!(book.addresses.len(), 1);
    }

    #[test]
    fn test_payment_methods_follow_same_rules() {
        let mut book = book();
        assert_eq!(
            book.remove_payment_method(PaymentMethodId::new(1)),
            Err(AccountError::DefaultPaymentMethod)
        );
        book.set_default_payment_method(PaymentMethodId::new(2)).unwrap();
        assert!(book.remove_payment_method(PaymentMethodId::new(1)).is_ok());
        assert_eq!(book.payment_methods.len(), 1);
    }

    #[test]
    fn test_toggle_preference() {
        let mut prefs = Preferences::default();
        assert!(prefs.toggle(Preference::SmsNotifications));
        assert!(prefs.get(Preference::SmsNotifications));
        assert!(!prefs.toggle(Preference::EmailNotifications));
    }

    #[test]
    fn test_preference_from_key() {
        assert_eq!(
            "dark_mode".parse::<Preference>().unwrap(),
            Preference::DarkMode
        );
        assert!("night_mode".parse::<Preference>().is_err());
    }
}
