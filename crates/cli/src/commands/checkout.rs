//! Checkout command.

use std::io::Write;

use jewelry_shop_storefront::error::AppError;
use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::views::{PaymentMethod, place_order};

use super::CommandResult;
use crate::Method;

/// Map command-line flags to a payment method.
///
/// A missing UPI ID becomes an empty one, which checkout rejects.
pub fn payment_method(method: Method, upi_id: Option<String>) -> PaymentMethod {
    match method {
        Method::Cod => PaymentMethod::CashOnDelivery,
        Method::Upi => PaymentMethod::Upi {
            upi_id: upi_id.unwrap_or_default(),
        },
    }
}

/// Place an order for the cart and print the receipt.
pub fn place(session: &ShopSession, payment: PaymentMethod, out: &mut impl Write) -> CommandResult {
    let order = place_order(session.cart(), payment).map_err(AppError::from)?;
    writeln!(out, "Order placed successfully!")?;
    writeln!(out, "{}", order.render_text()?.trim_end())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jewelry_shop_core::ProductId;
    use jewelry_shop_storefront::catalog::FixtureCatalog;
    use jewelry_shop_storefront::views;

    use super::*;
    use crate::commands::test_support::{output, session};

    #[test]
    fn test_checkout_prints_receipt() {
        let session = session();
        views::products::add_to_cart(&FixtureCatalog::new(), &session, ProductId::new(7), 2)
            .unwrap();

        let mut buf = Vec::new();
        place(&session, payment_method(Method::Cod, None), &mut buf).unwrap();

        let text = output(buf);
        assert!(text.starts_with("Order placed successfully!\nOrder "));
        assert!(text.contains("Payment: Cash on Delivery"));
        assert!(text.contains("Total: ₹56,000"));
        assert!(session.cart().snapshot().is_empty());
    }

    #[test]
    fn test_upi_without_id_fails() {
        let session = session();
        views::products::add_to_cart(&FixtureCatalog::new(), &session, ProductId::new(7), 1)
            .unwrap();

        let mut buf = Vec::new();
        assert!(place(&session, payment_method(Method::Upi, None), &mut buf).is_err());
        assert_eq!(session.cart().cart_count(), 1);
    }
}
