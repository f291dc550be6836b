use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Stored in the `password` column as an argon2 PHC string.
    pub password_hash: String,
    pub name: String,
}

/// Fields needed to insert a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            email,
            name,
            password_hash,
        }
    }
}
