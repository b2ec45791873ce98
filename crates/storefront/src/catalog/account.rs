//! Saved addresses and cards every new session starts with.

use botanical_core::{AccountBook, Address, AddressId, PaymentMethod, PaymentMethodId, Preferences};

pub(super) fn starter_account() -> AccountBook {
    AccountBook {
        addresses: vec![
            Address {
                id: AddressId::new(1),
                name: "Home".to_string(),
                street: "123 Main Street".to_string(),
                city: "Bucharest".to_string(),
                state: "Sector 1".to_string(),
                zip_code: "012345".to_string(),
                is_default: true,
            },
            Address {
                id: AddressId::new(2),
                name: "Office".to_string(),
                street: "456 Business Avenue".to_string(),
                city: "Bucharest".to_string(),
                state: "Sector 2".to_string(),
                zip_code: "023456".to_string(),
                is_default: false,
            },
        ],
        payment_methods: vec![
            PaymentMethod {
                id: PaymentMethodId::new(1),
                card_type: "Visa".to_string(),
                last_four: "4242".to_string(),
                expiry_date: "12/25".to_string(),
                is_default: true,
            },
            PaymentMethod {
                id: PaymentMethodId::new(2),
                card_type: "Mastercard".to_string(),
                last_four: "8888".to_string(),
                expiry_date: "09/24".to_string(),
                is_default: false,
            },
        ],
        preferences: Preferences::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_account_has_one_default_of_each() {
        let book = starter_account();
        assert_eq!(book.addresses.iter().filter(|a| a.is_default).count(), 1);
        assert_eq!(
            book.payment_methods.iter().filter(|m| m.is_default).count(),
            1
        );
        assert_eq!(
            book.default_address().map(|a| a.name.as_str()),
            Some("Home")
        );
    }
}
