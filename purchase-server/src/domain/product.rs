use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::domain::error::DomainError;

pub const DEFAULT_VALIDITY: &str = "Indeterminate";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub amount: i64,
    pub brand: String,
    pub validity: String,
    pub creation_date: DateTime<Utc>,
}

/// The four mutable fields of a product. Creation and update both take the
/// full set; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub amount: i64,
    pub brand: String,
    pub validity: String,
}

impl ProductFields {
    pub fn new(name: String, amount: i64, brand: String, validity: Option<String>) -> Self {
        let validity = validity
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VALIDITY.to_string());
        Self {
            name,
            amount,
            brand,
            validity,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::Validation("brand must not be empty".into()));
        }
        Ok(())
    }
}
