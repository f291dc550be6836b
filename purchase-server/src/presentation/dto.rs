use crate::domain::product::ProductFields;
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ======================= USERS =======================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Public shape of a user. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

// ======================= PURCHASES =======================

/// JSON body for create and replace. Every field is required.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub amount: i64,
    pub brand: String,
    pub validity: String,
}

impl From<ProductRequest> for ProductFields {
    fn from(req: ProductRequest) -> Self {
        ProductFields {
            name: req.name,
            amount: req.amount,
            brand: req.brand,
            validity: req.validity,
        }
    }
}

/// Urlencoded body posted by the list and edit pages.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub amount: i64,
    pub brand: String,
    #[serde(default)]
    pub validity: Option<String>,
}

impl From<ProductForm> for ProductFields {
    fn from(form: ProductForm) -> Self {
        ProductFields::new(form.name, form.amount, form.brand, form.validity)
    }
}

// ======================= Utils =======================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
