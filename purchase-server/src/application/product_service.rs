use std::sync::Arc;

use crate::data::product_repository::ProductRepository;
use crate::domain::{
    error::DomainError,
    product::{Product, ProductFields},
};
use tracing::instrument;

#[derive(Clone)]
pub struct ProductService<R: ProductRepository + 'static> {
    repo: Arc<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ProductNotFound(id))
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list_by_creation_date().await
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, fields: ProductFields) -> Result<Product, DomainError> {
        fields.validate()?;
        self.repo.create(fields).await
    }

    #[instrument(skip(self))]
    pub async fn replace_product(
        &self,
        id: i64,
        fields: ProductFields,
    ) -> Result<Product, DomainError> {
        fields.validate()?;
        match self.repo.update(id, fields).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(DomainError::ProductNotFound(id)),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::product_repository::SqliteProductRepository;
    use crate::infrastructure::database::memory_pool;

    async fn service() -> ProductService<SqliteProductRepository> {
        ProductService::new(Arc::new(SqliteProductRepository::new(memory_pool().await)))
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_everywhere() {
        let svc = service().await;
        let fields = ProductFields::new("Milk".into(), 2, "Acme".into(), None);

        assert!(matches!(
            svc.get_product(9).await,
            Err(DomainError::ProductNotFound(9))
        ));
        assert!(matches!(
            svc.replace_product(9, fields).await,
            Err(DomainError::ProductNotFound(9))
        ));
        assert!(matches!(
            svc.delete_product(9).await,
            Err(DomainError::ProductNotFound(9))
        ));
    }

    #[tokio::test]
    async fn replace_then_get_reflects_new_fields() {
        let svc = service().await;
        let created = svc
            .create_product(ProductFields::new("Milk".into(), 2, "Acme".into(), None))
            .await
            .unwrap();

        let fields = ProductFields::new("Eggs".into(), 12, "Farm".into(), Some("2025-06-01".into()));
        svc.replace_product(created.id, fields.clone()).await.unwrap();

        let fetched = svc.get_product(created.id).await.unwrap();
        assert_eq!(
            ProductFields {
                name: fetched.name,
                amount: fetched.amount,
                brand: fetched.brand,
                validity: fetched.validity,
            },
            fields
        );
    }
}
