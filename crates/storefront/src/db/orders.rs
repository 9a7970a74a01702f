//! Order repository: transactional order creation and history reads.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sanchi_core::{OrderId, OrderStatus, PAYMENT_METHOD_UPI, Price, UserId};

use super::RepositoryError;
use crate::models::{CartLine, OrderLine, OrderSummary};

/// Inputs for a new order beyond its line items.
#[derive(Debug)]
pub struct NewOrder<'a> {
    /// Server-computed order total.
    pub total: Price,
    /// Customer-supplied 12-digit UTR for the manual UPI transfer.
    pub transaction_id: &'a str,
    /// Free-text shipping address.
    pub shipping_address: &'a str,
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    order_id: OrderId,
    total_amount: Price,
    status: String,
    created_at: DateTime<Utc>,
    item_name: String,
    item_qty: i64,
    item_price: Price,
}

/// Repository for order creation and history.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a cart into an order inside one transaction.
    ///
    /// Inserts the order row (status "Pending Verification", payment method
    /// UPI), one order line per cart line, then deletes all of the user's
    /// cart lines. Commits only after all three steps succeed; any failure
    /// rolls back, leaving both the cart and the orders table untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement or the commit
    /// fails.
    pub async fn create_from_lines(
        &self,
        user_id: UserId,
        order: &NewOrder<'_>,
        lines: &[CartLine],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders
                (user_id, total_amount, status, payment_method, transaction_id,
                 shipping_address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(order.total)
        .bind(OrderStatus::PendingVerification.as_str())
        .bind(PAYMENT_METHOD_UPI)
        .bind(order.transaction_id)
        .bind(order.shipping_address)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, name, quantity, price)
                VALUES (?1, ?2, ?3, ?4)
                ",
            )
            .bind(order_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(order_id)
    }

    /// A user's order history, most recent first, line items nested.
    ///
    /// Ids are monotonic, so id-descending is creation order without relying
    /// on text timestamp comparisons.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r"
            SELECT o.id         AS order_id,
                   o.total_amount,
                   o.status,
                   o.created_at,
                   i.name       AS item_name,
                   i.quantity   AS item_qty,
                   i.price      AS item_price
            FROM orders o
            JOIN order_items i ON i.order_id = o.id
            WHERE o.user_id = ?1
            ORDER BY o.id DESC, i.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        // Rows arrive grouped by order; fold consecutive runs into summaries.
        let mut orders: Vec<OrderSummary> = Vec::new();
        for row in rows {
            let item = OrderLine {
                name: row.item_name,
                qty: row.item_qty,
                price: row.item_price,
            };
            match orders.last_mut() {
                Some(last) if last.order_id == row.order_id => last.items.push(item),
                _ => orders.push(OrderSummary {
                    order_id: row.order_id,
                    total: row.total_amount,
                    status: OrderStatus::from(row.status),
                    date: row.created_at,
                    items: vec![item],
                }),
            }
        }

        Ok(orders)
    }
}
