//! Product repository and first-boot catalog seeding.

use sqlx::SqlitePool;

use sanchi_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// The Sanchi Wellness catalog, inserted once when the products table is
/// empty. Image paths resolve against the /uploads static mount.
const SEED_CATALOG: &[(i64, &str, &str, i64, &str, &str, Option<&str>)] = &[
    (
        1,
        "Male Might",
        "Extreme Satisfaction",
        899,
        "Men's Health",
        "/uploads/Products/P1.jpeg",
        Some("Best Seller"),
    ),
    (
        2,
        "Virility Maxx",
        "Vitality Booster",
        749,
        "Men's Health",
        "/uploads/Products/P2.jpeg",
        Some("Trending"),
    ),
    (
        3,
        "Aloe Aura",
        "Soothe & Glow Gel",
        199,
        "Skin Care",
        "/uploads/Products/P3.jpeg",
        None,
    ),
    (
        4,
        "Piyoosh",
        "Pure Cow Colostrum",
        699,
        "Immunity",
        "/uploads/Products/P4.jpeg",
        None,
    ),
    (
        5,
        "Wild Roots",
        "Anti Hair Fall Shampoo",
        349,
        "Hair Care",
        "/uploads/Products/P5.jpeg",
        Some("Herbal"),
    ),
    (
        6,
        "Blossom Care",
        "Intimate Hygiene Wash",
        299,
        "Personal Care",
        "/uploads/Products/P6.jpeg",
        None,
    ),
    (
        7,
        "Aspire Saffron Soap",
        "Sandalwood & Saffron",
        129,
        "Bath & Body",
        "/uploads/Products/P7.jpeg",
        Some("Organic"),
    ),
    (
        8,
        "Aspire Glow Soap",
        "Cream Soft Soap",
        119,
        "Bath & Body",
        "/uploads/Products/P8.jpeg",
        None,
    ),
    (
        9,
        "Aspire Face Wash",
        "Cucumber & Tea Tree",
        249,
        "Face Care",
        "/uploads/Products/P9.jpeg",
        Some("Daily Use"),
    ),
];

/// Repository for catalog reads and first-boot seeding.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the full catalog in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, img, tag
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, img, tag
            FROM products
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Seed the default catalog if the table is empty.
    ///
    /// Returns the number of products inserted (0 on every boot after the
    /// first).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn seed_default_catalog(&self) -> Result<usize, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        if count > 0 {
            return Ok(0);
        }

        for (id, name, description, price, category, img, tag) in SEED_CATALOG {
            sqlx::query(
                r"
                INSERT INTO products (id, name, description, price, category, img, tag)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(Price::from_rupees(*price))
            .bind(category)
            .bind(img)
            .bind(*tag)
            .execute(self.pool)
            .await?;
        }

        Ok(SEED_CATALOG.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_seed_runs_once() {
        let pool = memory_pool().await;
        let products = ProductRepository::new(&pool);

        assert_eq!(products.seed_default_catalog().await.unwrap(), 9);
        assert_eq!(products.seed_default_catalog().await.unwrap(), 0);

        let catalog = products.list().await.unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.first().unwrap().name, "Male Might");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = memory_pool().await;
        let products = ProductRepository::new(&pool);
        products.seed_default_catalog().await.unwrap();

        let soap = products.get(ProductId::new(7)).await.unwrap().unwrap();
        assert_eq!(soap.name, "Aspire Saffron Soap");
        assert_eq!(soap.price, Price::from_rupees(129));
        assert_eq!(soap.tag.as_deref(), Some("Organic"));

        assert!(products.get(ProductId::new(99)).await.unwrap().is_none());
    }
}
