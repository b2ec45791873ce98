//! In-memory back-office tables and their mutations.
//!
//! [`BackOffice`] is plain data with synchronous operations; [`AdminState`]
//! wraps it in a lock and adds the simulated backend latency.
//!
//! [`AdminState`]: crate::state::AdminState

use botanical_core::{OrderId, OrderStatus, PaymentGatewayId, ProductId, ShippingMethodId, UserId};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    AdminOrder, AdminProduct, AdminSettings, AdminUser, GeneralSettings, PaymentGateway,
    ProductDraft, ShippingMethod,
    order::seed_orders,
    product::seed_products,
    settings::{PaymentGatewayDraft, ShippingMethodDraft, seed_settings},
    user::{UserUpdate, seed_users},
};

/// A back-office record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackOfficeError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("shipping method {0} not found")]
    ShippingMethodNotFound(ShippingMethodId),
    #[error("payment gateway {0} not found")]
    PaymentGatewayNotFound(PaymentGatewayId),
}

/// Next id after the largest in use, or 1 for an empty table.
fn next_id<Id: Copy + Ord>(ids: impl Iterator<Item = Id>, first: Id, next: fn(&Id) -> Id) -> Id {
    ids.max().map_or(first, |max| next(&max))
}

/// Every back-office table.
#[derive(Debug, Clone, PartialEq)]
pub struct BackOffice {
    products: Vec<AdminProduct>,
    orders: Vec<AdminOrder>,
    users: Vec<AdminUser>,
    settings: AdminSettings,
}

impl Default for BackOffice {
    fn default() -> Self {
        Self::seeded()
    }
}

impl BackOffice {
    /// Tables filled with the mock rows.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
            orders: seed_orders(),
            users: seed_users(),
            settings: seed_settings(),
        }
    }

    // Products

    #[must_use]
    pub fn products(&self) -> &[AdminProduct] {
        &self.products
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::ProductNotFound`] for an unknown id.
    pub fn product(&self, id: ProductId) -> Result<&AdminProduct, BackOfficeError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(BackOfficeError::ProductNotFound(id))
    }

    /// Append a product under the next free id.
    pub fn add_product(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> AdminProduct {
        let id = next_id(
            self.products.iter().map(|p| p.id),
            ProductId::new(1),
            ProductId::next,
        );
        let product = draft.into_product(id, now, now);
        self.products.push(product.clone());
        product
    }

    /// Replace a product's fields, keeping its id and creation date.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::ProductNotFound`] for an unknown id.
    pub fn update_product(
        &mut self,
        id: ProductId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<&AdminProduct, BackOfficeError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BackOfficeError::ProductNotFound(id))?;
        *product = draft.into_product(id, product.created_at, now);
        Ok(&*product)
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::ProductNotFound`] for an unknown id.
    pub fn delete_product(&mut self, id: ProductId) -> Result<AdminProduct, BackOfficeError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(BackOfficeError::ProductNotFound(id))?;
        Ok(self.products.remove(index))
    }

    // Orders

    #[must_use]
    pub fn orders(&self) -> &[AdminOrder] {
        &self.orders
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::OrderNotFound`] for an unknown id.
    pub fn order(&self, id: OrderId) -> Result<&AdminOrder, BackOfficeError> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or(BackOfficeError::OrderNotFound(id))
    }

    /// Set one order's status and touch its update time.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::OrderNotFound`] for an unknown id.
    pub fn update_order_status(
        &mut self,
        id: OrderId,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<&AdminOrder, BackOfficeError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(BackOfficeError::OrderNotFound(id))?;
        order.status = status;
        order.updated_at = now;
        Ok(&*order)
    }

    /// Set the status of every listed order; unknown ids are skipped.
    ///
    /// Returns how many orders were updated.
    pub fn bulk_update_order_status(
        &mut self,
        ids: &[OrderId],
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> usize {
        let mut updated = 0;
        for order in self.orders.iter_mut().filter(|o| ids.contains(&o.id)) {
            order.status = status;
            order.updated_at = now;
            updated += 1;
        }
        updated
    }

    /// The newest orders by creation date.
    #[must_use]
    pub fn recent_orders(&self, limit: usize) -> Vec<AdminOrder> {
        let mut orders = self.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(limit);
        orders
    }

    // Users

    #[must_use]
    pub fn users(&self) -> &[AdminUser] {
        &self.users
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::UserNotFound`] for an unknown id.
    pub fn user(&self, id: UserId) -> Result<&AdminUser, BackOfficeError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(BackOfficeError::UserNotFound(id))
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::UserNotFound`] for an unknown id.
    pub fn update_user(
        &mut self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<&AdminUser, BackOfficeError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(BackOfficeError::UserNotFound(id))?;
        user.name = update.name;
        user.email = update.email.into_inner();
        user.role = update.role;
        user.status = update.status;
        Ok(&*user)
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::UserNotFound`] for an unknown id.
    pub fn delete_user(&mut self, id: UserId) -> Result<AdminUser, BackOfficeError> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(BackOfficeError::UserNotFound(id))?;
        Ok(self.users.remove(index))
    }

    // Settings

    #[must_use]
    pub const fn settings(&self) -> &AdminSettings {
        &self.settings
    }

    pub fn update_general(&mut self, general: GeneralSettings) {
        self.settings.general = general;
    }

    pub fn add_shipping_method(&mut self, draft: ShippingMethodDraft) -> ShippingMethod {
        let methods = &mut self.settings.shipping_methods;
        let id = next_id(
            methods.iter().map(|m| m.id),
            ShippingMethodId::new(1),
            ShippingMethodId::next,
        );
        let method = ShippingMethod {
            id,
            name: draft.name,
            price: draft.price,
            estimated_delivery: draft.estimated_delivery,
        };
        methods.push(method.clone());
        method
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::ShippingMethodNotFound`] for an unknown id.
    pub fn update_shipping_method(
        &mut self,
        id: ShippingMethodId,
        draft: ShippingMethodDraft,
    ) -> Result<&ShippingMethod, BackOfficeError> {
        let method = self
            .settings
            .shipping_methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BackOfficeError::ShippingMethodNotFound(id))?;
        method.name = draft.name;
        method.price = draft.price;
        method.estimated_delivery = draft.estimated_delivery;
        Ok(&*method)
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::ShippingMethodNotFound`] for an unknown id.
    pub fn delete_shipping_method(
        &mut self,
        id: ShippingMethodId,
    ) -> Result<ShippingMethod, BackOfficeError> {
        let methods = &mut self.settings.shipping_methods;
        let index = methods
            .iter()
            .position(|m| m.id == id)
            .ok_or(BackOfficeError::ShippingMethodNotFound(id))?;
        Ok(methods.remove(index))
    }

    pub fn add_payment_gateway(&mut self, draft: PaymentGatewayDraft) -> PaymentGateway {
        let gateways = &mut self.settings.payment_gateways;
        let id = next_id(
            gateways.iter().map(|g| g.id),
            PaymentGatewayId::new(1),
            PaymentGatewayId::next,
        );
        let gateway = PaymentGateway {
            id,
            name: draft.name,
            enabled: draft.enabled,
        };
        gateways.push(gateway.clone());
        gateway
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::PaymentGatewayNotFound`] for an unknown id.
    pub fn update_payment_gateway(
        &mut self,
        id: PaymentGatewayId,
        draft: PaymentGatewayDraft,
    ) -> Result<&PaymentGateway, BackOfficeError> {
        let gateway = self.gateway_mut(id)?;
        gateway.name = draft.name;
        gateway.enabled = draft.enabled;
        Ok(&*gateway)
    }

    /// Flip a gateway between enabled and disabled.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::PaymentGatewayNotFound`] for an unknown id.
    pub fn toggle_payment_gateway(
        &mut self,
        id: PaymentGatewayId,
    ) -> Result<&PaymentGateway, BackOfficeError> {
        let gateway = self.gateway_mut(id)?;
        gateway.enabled = !gateway.enabled;
        Ok(&*gateway)
    }

    /// # Errors
    ///
    /// Returns [`BackOfficeError::PaymentGatewayNotFound`] for an unknown id.
    pub fn delete_payment_gateway(
        &mut self,
        id: PaymentGatewayId,
    ) -> Result<PaymentGateway, BackOfficeError> {
        let gateways = &mut self.settings.payment_gateways;
        let index = gateways
            .iter()
            .position(|g| g.id == id)
            .ok_or(BackOfficeError::PaymentGatewayNotFound(id))?;
        Ok(gateways.remove(index))
    }

    fn gateway_mut(&mut self, id: PaymentGatewayId) -> Result<&mut PaymentGateway, BackOfficeError> {
        self.settings
            .payment_gateways
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(BackOfficeError::PaymentGatewayNotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use botanical_core::{AccountRole, AccountStatus, Email, Price};

    use super::*;
    use crate::models::ProductForm;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2023-11-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn draft(name: &str) -> ProductDraft {
        ProductForm {
            name: name.to_string(),
            ..ProductForm::blank()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_add_product_uses_next_id() {
        let mut office = BackOffice::seeded();
        let added = office.add_product(draft("Pothos"), now());
        assert_eq!(added.id, ProductId::new(7));
        assert_eq!(added.created_at, now());
        assert_eq!(office.products().len(), 7);
    }

    #[test]
    fn test_add_product_after_delete_of_last_reuses_nothing_higher() {
        let mut office = BackOffice::seeded();
        office.delete_product(ProductId::new(3)).unwrap();
        let added = office.add_product(draft("Pothos"), now());
        assert_eq!(added.id, ProductId::new(7));
    }

    #[test]
    fn test_update_product_keeps_created_at() {
        let mut office = BackOffice::seeded();
        let created = office.product(ProductId::new(1)).unwrap().created_at;
        let updated = office
            .update_product(ProductId::new(1), draft("Snake Plant Laurentii"), now())
            .unwrap();
        assert_eq!(updated.name, "Snake Plant Laurentii");
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, now());
    }

    #[test]
    fn test_missing_records() {
        let mut office = BackOffice::seeded();
        assert_eq!(
            office.delete_product(ProductId::new(99)),
            Err(BackOfficeError::ProductNotFound(ProductId::new(99)))
        );
        assert_eq!(
            office.order(OrderId::new(99)).unwrap_err(),
            BackOfficeError::OrderNotFound(OrderId::new(99))
        );
        assert!(office.toggle_payment_gateway(PaymentGatewayId::new(99)).is_err());
    }

    #[test]
    fn test_order_status_update_touches_updated_at() {
        let mut office = BackOffice::seeded();
        let order = office
            .update_order_status(OrderId::new(4), OrderStatus::Processing, now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.updated_at, now());
    }

    #[test]
    fn test_bulk_update_counts_existing_orders_only() {
        let mut office = BackOffice::seeded();
        let count = office.bulk_update_order_status(
            &[OrderId::new(1), OrderId::new(2), OrderId::new(42)],
            OrderStatus::Cancelled,
            now(),
        );
        assert_eq!(count, 2);
        assert_eq!(
            office.order(OrderId::new(2)).unwrap().status,
            OrderStatus::Cancelled
        );
        assert_eq!(
            office.order(OrderId::new(3)).unwrap().status,
            OrderStatus::Processing
        );
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let office = BackOffice::seeded();
        let recent: Vec<String> = office
            .recent_orders(2)
            .into_iter()
            .map(|o| o.order_number)
            .collect();
        assert_eq!(recent, ["ORD-2023-004", "ORD-2023-003"]);
    }

    #[test]
    fn test_update_and_delete_user() {
        let mut office = BackOffice::seeded();
        let user = office
            .update_user(
                UserId::new(5),
                UserUpdate {
                    name: "Emily D.".to_string(),
                    email: Email::parse("emily.d@example.com").unwrap(),
                    role: AccountRole::Customer,
                    status: AccountStatus::Active,
                },
            )
            .unwrap();
        assert_eq!(user.email, "emily.d@example.com");
        assert!(user.is_active());

        let removed = office.delete_user(UserId::new(5)).unwrap();
        assert_eq!(removed.name, "Emily D.");
        assert!(office.user(UserId::new(5)).is_err());
    }

    #[test]
    fn test_shipping_method_lifecycle() {
        let mut office = BackOffice::seeded();
        let added = office.add_shipping_method(ShippingMethodDraft {
            name: "Next Day".to_string(),
            price: Price::from_cents(1999),
            estimated_delivery: "1 business day".to_string(),
        });
        assert_eq!(added.id, ShippingMethodId::new(4));

        office
            .update_shipping_method(
                ShippingMethodId::new(4),
                ShippingMethodDraft {
                    name: "Overnight".to_string(),
                    price: Price::from_cents(2499),
                    estimated_delivery: "Next morning".to_string(),
                },
            )
            .unwrap();
        let removed = office
            .delete_shipping_method(ShippingMethodId::new(4))
            .unwrap();
        assert_eq!(removed.name, "Overnight");
        assert_eq!(office.settings().shipping_methods.len(), 3);
    }

    #[test]
    fn test_toggle_payment_gateway() {
        let mut office = BackOffice::seeded();
        let gateway = office
            .toggle_payment_gateway(PaymentGatewayId::new(3))
            .unwrap();
        assert!(gateway.enabled);
        let gateway = office
            .toggle_payment_gateway(PaymentGatewayId::new(3))
            .unwrap();
        assert!(!gateway.enabled);
    }

    #[test]
    fn test_next_id_on_empty_table() {
        let mut office = BackOffice::seeded();
        for id in 1..=4 {
            office
                .delete_payment_gateway(PaymentGatewayId::new(id))
                .unwrap();
        }
        let added = office.add_payment_gateway(PaymentGatewayDraft {
            name: "Stripe".to_string(),
            enabled: true,
        });
        assert_eq!(added.id, PaymentGatewayId::new(1));
    }
}
