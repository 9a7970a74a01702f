//! Checkout service: converts the server-held cart into an order.
//!
//! The stored cart is the source of truth. The client's total is advisory
//! only - the service recomputes it from the stored lines and rejects a
//! mismatch instead of trusting the caller.

use sqlx::SqlitePool;
use thiserror::Error;

use sanchi_core::{OrderId, Price, UserId};

use crate::db::orders::NewOrder;
use crate::db::{CartRepository, OrderRepository, RepositoryError};
use crate::models::CartLine;

/// Shipping addresses shorter than this can't plausibly be delivered to.
const MIN_ADDRESS_LENGTH: usize = 10;

/// UPI UTR reference numbers are exactly 12 digits.
const UTR_LENGTH: usize = 12;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The user's cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping address missing or too short.
    #[error("shipping address must be at least {MIN_ADDRESS_LENGTH} characters")]
    InvalidAddress,

    /// Transaction reference is not a 12-digit UTR.
    #[error("transaction reference must be the 12-digit UTR number")]
    InvalidReference,

    /// The advisory total does not match the server-computed total.
    #[error("cart total mismatch: expected {computed}, got {supplied}")]
    TotalMismatch {
        /// Total the client claimed.
        supplied: Price,
        /// Total recomputed from the stored cart.
        computed: Price,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout orchestrator.
pub struct CheckoutService<'a> {
    carts: CartRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order from the user's stored cart.
    ///
    /// Validates the address and UTR, recomputes the total from the stored
    /// lines, checks it against the advisory total, then runs the
    /// order + lines + cart-clear sequence in one transaction. On any error
    /// the cart is left untouched so the client can re-fetch and retry.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first failed validation,
    /// or `CheckoutError::Repository` if the transaction fails.
    pub async fn place_order(
        &self,
        user_id: UserId,
        advisory_total: Price,
        transaction_id: &str,
        shipping_address: &str,
    ) -> Result<OrderId, CheckoutError> {
        let shipping_address = shipping_address.trim();
        if shipping_address.len() < MIN_ADDRESS_LENGTH {
            return Err(CheckoutError::InvalidAddress);
        }
        if !is_valid_utr(transaction_id) {
            return Err(CheckoutError::InvalidReference);
        }

        let lines = self.carts.items_for_user(user_id).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let computed: Price = lines.iter().map(CartLine::line_total).sum();
        if advisory_total != computed {
            return Err(CheckoutError::TotalMismatch {
                supplied: advisory_total,
                computed,
            });
        }

        let order = NewOrder {
            total: computed,
            transaction_id,
            shipping_address,
        };
        let order_id = self
            .orders
            .create_from_lines(user_id, &order, &lines)
            .await?;

        Ok(order_id)
    }
}

/// A UTR is the 12-digit reference number from the payer's UPI app.
fn is_valid_utr(reference: &str) -> bool {
    reference.len() == UTR_LENGTH && reference.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{ProductRepository, UserRepository};
    use sanchi_core::{Email, ProductId};

    const UTR: &str = "402812345678";
    const ADDRESS: &str = "14 Lotus Street, Pune 411001";

    async fn setup(pool: &SqlitePool) -> UserId {
        let email = Email::parse("priya@example.com").unwrap();
        let user = UserRepository::new(pool)
            .create("Priya", &email, "hash")
            .await
            .unwrap();
        ProductRepository::new(pool)
            .seed_default_catalog()
            .await
            .unwrap();
        user.id
    }

    async fn add_product(pool: &SqlitePool, user_id: UserId, product_id: i64, times: usize) {
        let product = ProductRepository::new(pool)
            .get(ProductId::new(product_id))
            .await
            .unwrap()
            .unwrap();
        let cart = CartRepository::new(pool);
        for _ in 0..times {
            cart.add(user_id, &product).await.unwrap();
        }
    }

    #[test]
    fn test_utr_validation() {
        assert!(is_valid_utr("402812345678"));
        assert!(!is_valid_utr("4028123456"));
        assert!(!is_valid_utr("4028123456789"));
        assert!(!is_valid_utr("40281234567a"));
        assert!(!is_valid_utr(""));
    }

    #[tokio::test]
    async fn test_empty_cart_creates_no_order() {
        let pool = memory_pool().await;
        let user_id = setup(&pool).await;
        let checkout = CheckoutService::new(&pool);

        let err = checkout
            .place_order(user_id, Price::zero(), UTR, ADDRESS)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));

        let history = OrderRepository::new(&pool)
            .list_for_user(user_id)
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_short_address_and_bad_utr() {
        let pool = memory_pool().await;
        let user_id = setup(&pool).await;
        add_product(&pool, user_id, 7, 1).await;
        let checkout = CheckoutService::new(&pool);

        assert!(matches!(
            checkout
                .place_order(user_id, Price::from_rupees(129), UTR, "Pune")
                .await,
            Err(CheckoutError::InvalidAddress)
        ));
        assert!(matches!(
            checkout
                .place_order(user_id, Price::from_rupees(129), "not-a-utr", ADDRESS)
                .await,
            Err(CheckoutError::InvalidReference)
        ));
    }

    #[tokio::test]
    async fn test_rejects_total_mismatch_and_keeps_cart() {
        let pool = memory_pool().await;
        let user_id = setup(&pool).await;
        add_product(&pool, user_id, 7, 2).await;
        let checkout = CheckoutService::new(&pool);

        let err = checkout
            .place_order(user_id, Price::from_rupees(1), UTR, ADDRESS)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::TotalMismatch { computed, .. } if computed == Price::from_rupees(258)
        ));

        // The cart survives a rejected checkout.
        let lines = CartRepository::new(&pool)
            .items_for_user(user_id)
            .await
            .unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[tokio::test]
    async fn test_successful_checkout() {
        let pool = memory_pool().await;
        let user_id = setup(&pool).await;
        add_product(&pool, user_id, 7, 2).await;
        add_product(&pool, user_id, 8, 1).await;
        let checkout = CheckoutService::new(&pool);

        let order_id = checkout
            .place_order(user_id, Price::from_rupees(377), UTR, ADDRESS)
            .await
            .unwrap();

        assert!(
            CartRepository::new(&pool)
                .items_for_user(user_id)
                .await
                .unwrap()
                .is_empty()
        );

        let history = OrderRepository::new(&pool)
            .list_for_user(user_id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        let order = history.first().unwrap();
        assert_eq!(order.order_id, order_id);
        assert_eq!(order.total, Price::from_rupees(377));
        assert_eq!(order.items.len(), 2);
    }

    #[tokio::test]
    async fn test_accepts_scaled_but_equal_total() {
        let pool = memory_pool().await;
        let user_id = setup(&pool).await;
        add_product(&pool, user_id, 7, 1).await;
        let checkout = CheckoutService::new(&pool);

        // "129.00" from a client formatter is the same amount as 129.
        let total: Price = "129.00".parse().unwrap();
        assert!(
            checkout
                .place_order(user_id, total, UTR, ADDRESS)
                .await
                .is_ok()
        );
    }
}
