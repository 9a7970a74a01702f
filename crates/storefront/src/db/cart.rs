//! Cart repository.
//!
//! Each (user, product) pair moves through: absent -> present(qty=1) ->
//! present(qty>1) -> absent. Add is a single conditional upsert keyed on the
//! pair's unique index, so two concurrent adds for the same product can never
//! lose an update.

use sqlx::SqlitePool;

use sanchi_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartLine, Product};

/// Repository for cart line operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's cart lines in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT product_id, name, price, img, quantity
            FROM cart_items
            WHERE user_id = ?1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add one unit of a product, snapshotting its name/price/image.
    ///
    /// First add creates the line with quantity 1; repeat adds increment the
    /// existing line. One statement end to end.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn add(&self, user_id: UserId, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (user_id, product_id, name, price, img, quantity)
            VALUES (?1, ?2, ?3, ?4, ?5, 1)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = quantity + 1
            ",
        )
        .bind(user_id)
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.img)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Decrement a line's quantity, flooring at 1.
    ///
    /// A quantity-1 line is left as-is (removal requires [`Self::remove`]);
    /// a missing line affects zero rows and is not an error. Returns whether
    /// a row changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn decrease(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = quantity - 1
            WHERE user_id = ?1 AND product_id = ?2 AND quantity > 1
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a line unconditionally. Idempotent; returns whether a row
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE user_id = ?1 AND product_id = ?2
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{ProductRepository, UserRepository};
    use sanchi_core::{Email, Price};

    async fn setup(pool: &SqlitePool) -> (UserId, Product) {
        let email = Email::parse("priya@example.com").unwrap();
        let user = UserRepository::new(pool)
            .create("Priya", &email, "hash")
            .await
            .unwrap();

        let products = ProductRepository::new(pool);
        products.seed_default_catalog().await.unwrap();
        let soap = products.get(ProductId::new(7)).await.unwrap().unwrap();

        (user.id, soap)
    }

    #[tokio::test]
    async fn test_repeat_adds_keep_one_line() {
        let pool = memory_pool().await;
        let (user_id, soap) = setup(&pool).await;
        let cart = CartRepository::new(&pool);

        cart.add(user_id, &soap).await.unwrap();
        cart.add(user_id, &soap).await.unwrap();

        let lines = cart.items_for_user(user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        let line = lines.first().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Price::from_rupees(129));
        assert_eq!(line.name, "Aspire Saffron Soap");
    }

    #[tokio::test]
    async fn test_decrease_floors_at_one() {
        let pool = memory_pool().await;
        let (user_id, soap) = setup(&pool).await;
        let cart = CartRepository::new(&pool);

        cart.add(user_id, &soap).await.unwrap();
        cart.add(user_id, &soap).await.unwrap();

        assert!(cart.decrease(user_id, soap.id).await.unwrap());
        // A quantity-1 line is a no-op, not a deletion.
        assert!(!cart.decrease(user_id, soap.id).await.unwrap());

        let lines = cart.items_for_user(user_id).await.unwrap();
        assert_eq!(lines.first().unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_decrease_missing_line_is_silent() {
        let pool = memory_pool().await;
        let (user_id, soap) = setup(&pool).await;
        let cart = CartRepository::new(&pool);

        assert!(!cart.decrease(user_id, soap.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let pool = memory_pool().await;
        let (user_id, soap) = setup(&pool).await;
        let cart = CartRepository::new(&pool);

        cart.add(user_id, &soap).await.unwrap();

        assert!(cart.remove(user_id, soap.id).await.unwrap());
        assert!(!cart.remove(user_id, soap.id).await.unwrap());
        assert!(cart.items_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lines_keep_insertion_order() {
        let pool = memory_pool().await;
        let (user_id, soap) = setup(&pool).await;
        let products = ProductRepository::new(&pool);
        let shampoo = products.get(ProductId::new(5)).await.unwrap().unwrap();
        let cart = CartRepository::new(&pool);

        cart.add(user_id, &soap).await.unwrap();
        cart.add(user_id, &shampoo).await.unwrap();
        // Re-adding the first product must not reorder it.
        cart.add(user_id, &soap).await.unwrap();

        let names: Vec<_> = cart
            .items_for_user(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["Aspire Saffron Soap", "Wild Roots"]);
    }
}
