use crate::domain::error::DomainError;
use crate::domain::product::{Product, ProductFields};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, info};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, fields: ProductFields) -> Result<Product, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;
    async fn list_by_creation_date(&self) -> Result<Vec<Product>, DomainError>;
    /// Overwrites all mutable fields. `None` when no row has this id.
    async fn update(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, fields: ProductFields) -> Result<Product, DomainError> {
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, amount, brand, validity, creation_date)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, amount, brand, validity, creation_date
            "#,
        )
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(&fields.brand)
        .bind(&fields.validity)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create product: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(product_id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, amount, brand, validity, creation_date
            FROM products WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn list_by_creation_date(&self) -> Result<Vec<Product>, DomainError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, amount, brand, validity, creation_date
            FROM products
            ORDER BY creation_date ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching products: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, DomainError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = ?,
                amount = ?,
                brand = ?,
                validity = ?
            WHERE id = ?
            RETURNING id, name, amount, brand, validity, creation_date
            "#,
        )
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(&fields.brand)
        .bind(&fields.validity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update product {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if product.is_some() {
            info!(product_id = id, "product updated");
        }

        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::ProductNotFound(id));
        }

        info!(product_id = id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::memory_pool;

    fn milk() -> ProductFields {
        ProductFields::new("Milk".into(), 2, "Acme".into(), Some("2024-01-01".into()))
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = SqliteProductRepository::new(memory_pool().await);
        let created = repo.create(milk()).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().expect("exists");
        assert_eq!(found.name, "Milk");
        assert_eq!(found.amount, 2);
        assert_eq!(found.brand, "Acme");
        assert_eq!(found.validity, "2024-01-01");
        assert_eq!(found.creation_date, created.creation_date);
    }

    #[tokio::test]
    async fn list_is_ordered_by_creation_date() {
        let repo = SqliteProductRepository::new(memory_pool().await);
        for name in ["first", "second", "third"] {
            let mut fields = milk();
            fields.name = name.to_string();
            repo.create(fields).await.unwrap();
        }

        let products = repo.list_by_creation_date().await.unwrap();
        assert_eq!(products.len(), 3);
        assert!(
            products
                .windows(2)
                .all(|w| w[0].creation_date <= w[1].creation_date)
        );
        assert_eq!(products[0].name, "first");
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_creation_date() {
        let repo = SqliteProductRepository::new(memory_pool().await);
        let created = repo.create(milk()).await.unwrap();

        let replacement = ProductFields::new("Bread".into(), 1, "Baker".into(), None);
        let updated = repo
            .update(created.id, replacement.clone())
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.name, replacement.name);
        assert_eq!(updated.amount, 1);
        assert_eq!(updated.brand, "Baker");
        assert_eq!(updated.validity, "Indeterminate");
        assert_eq!(updated.creation_date, created.creation_date);
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let repo = SqliteProductRepository::new(memory_pool().await);
        assert!(repo.update(404, milk()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = SqliteProductRepository::new(memory_pool().await);
        let created = repo.create(milk()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());

        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(id) if id == created.id));
    }
}
