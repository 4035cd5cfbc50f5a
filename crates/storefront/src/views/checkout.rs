//! Checkout: turn the cart into an order confirmation.
//!
//! There is no payment processing. Placing an order snapshots the cart into
//! an [`OrderConfirmation`], clears the cart, and hands the confirmation back
//! for display.

use std::fmt;

use askama::Template;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::error::Result;
use crate::filters;
use crate::stores::{CartSnapshot, CartStore};

/// Error type for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    #[error("a UPI ID is required for UPI payments")]
    MissingUpiId,
}

/// How the shopper pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    CashOnDelivery,
    Upi { upi_id: String },
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CashOnDelivery => write!(f, "Cash on Delivery"),
            Self::Upi { upi_id } => write!(f, "UPI ({upi_id})"),
        }
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub payment: PaymentMethod,
    pub lines: Vec<OrderLine>,
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderConfirmation {
    fn from_cart(cart: &CartSnapshot, payment: PaymentMethod) -> Self {
        let subtotal = cart.total();
        let shipping = Decimal::ZERO;
        Self {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            payment,
            lines: cart
                .iter()
                .map(|line| OrderLine {
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    line_price: filters::format_inr(line.line_total()),
                })
                .collect(),
            item_count: cart.count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Render the receipt as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(ReceiptTemplate { order: self }.render()?)
    }
}

#[derive(Template)]
#[template(path = "receipt.txt")]
struct ReceiptTemplate<'a> {
    order: &'a OrderConfirmation,
}

/// Place an order for everything in the cart, then clear it.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no lines, or
/// `CheckoutError::MissingUpiId` if a UPI payment has a blank id. The cart is
/// untouched on error.
pub fn place_order(
    cart: &CartStore,
    payment: PaymentMethod,
) -> Result<OrderConfirmation, CheckoutError> {
    let payment = match payment {
        PaymentMethod::Upi { upi_id } if upi_id.trim().is_empty() => {
            return Err(CheckoutError::MissingUpiId);
        }
        PaymentMethod::Upi { upi_id } => PaymentMethod::Upi {
            upi_id: upi_id.trim().to_string(),
        },
        PaymentMethod::CashOnDelivery => PaymentMethod::CashOnDelivery,
    };

    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = OrderConfirmation::from_cart(&snapshot, payment);
    cart.clear_cart();

    tracing::info!(
        order_id = %order.order_id,
        items = order.item_count,
        total = %order.total,
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use jewelry_shop_core::{Product, ProductId};

    use super::*;
    use crate::storage::MemoryStorage;

    fn cart_with_items() -> CartStore {
        let cart = CartStore::load(Arc::new(MemoryStorage::new()));
        cart.add_to_cart(
            Product::new(
                ProductId::new(1),
                "Eternal Gold Bangle",
                Decimal::from(45_000),
                "Bangles",
            ),
            2,
        )
        .unwrap();
        cart.add_one(Product::new(
            ProductId::new(4),
            "Pearl Drop Earrings",
            Decimal::from(18_000),
            "Earrings",
        ));
        cart
    }

    #[test]
    fn test_place_order_clears_cart() {
        let cart = cart_with_items();
        let order = place_order(&cart, PaymentMethod::CashOnDelivery).unwrap();

        assert_eq!(order.item_count, 3);
        assert_eq!(order.subtotal, Decimal::from(108_000));
        assert_eq!(order.total, Decimal::from(108_000));
        assert_eq!(order.lines.len(), 2);
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = CartStore::load(Arc::new(MemoryStorage::new()));
        assert_eq!(
            place_order(&cart, PaymentMethod::CashOnDelivery),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_upi_requires_id() {
        let cart = cart_with_items();
        let result = place_order(
            &cart,
            PaymentMethod::Upi {
                upi_id: "  ".to_string(),
            },
        );
        assert_eq!(result, Err(CheckoutError::MissingUpiId));
        assert_eq!(cart.cart_count(), 3);
    }

    #[test]
    fn test_receipt_text() {
        let cart = cart_with_items();
        let order = place_order(
            &cart,
            PaymentMethod::Upi {
                upi_id: " shopper@upi ".to_string(),
            },
        )
        .unwrap();

        let text = order.render_text().unwrap();
        assert!(text.contains("Payment: UPI (shopper@upi)"));
        assert!(text.contains("Eternal Gold Bangle x 2 = ₹90,000"));
        assert!(text.contains("Shipping: Free"));
        assert!(text.contains("Total: ₹1,08,000"));
    }
}
