use std::sync::Arc;

use tracing::{instrument, warn};

use crate::data::user_repository::UserRepository;
use crate::domain::{
    error::DomainError,
    user::{NewUser, User},
};
use crate::infrastructure::security::{decode_basic_credentials, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R> AuthService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: String,
        name: String,
        password: String,
    ) -> Result<User, DomainError> {
        if self.repo.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(DomainError::EmailAlreadyExists);
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        self.repo.create(NewUser::new(email, name, hash)).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list_by_email().await
    }

    /// Checks an email/password pair. Unknown email, wrong password and an
    /// unreadable stored hash all come back as `Unauthorized`.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::Unauthorized)?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }

        Ok(user)
    }

    /// Resolves the principal for an `Authorization` header value.
    /// `Ok(None)` means anonymous; only storage failures are errors.
    pub async fn resolve(&self, header: Option<&str>) -> Result<Option<User>, DomainError> {
        let Some(credentials) = header.and_then(decode_basic_credentials) else {
            return Ok(None);
        };

        match self
            .authenticate(&credentials.email, &credentials.password)
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(DomainError::Unauthorized) => {
                warn!(email = %credentials.email, "credential check failed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::SqliteUserRepository;
    use crate::infrastructure::database::memory_pool;
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    async fn service() -> AuthService<SqliteUserRepository> {
        AuthService::new(Arc::new(SqliteUserRepository::new(memory_pool().await)))
    }

    #[tokio::test]
    async fn signup_stores_hash_not_plaintext() {
        let svc = service().await;
        let user = svc
            .signup("ana@example.com".into(), "Ana".into(), "s3cret".into())
            .await
            .unwrap();
        assert_ne!(user.password_hash, "s3cret");
        assert!(verify_password("s3cret", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email_without_writing() {
        let svc = service().await;
        svc.signup("ana@example.com".into(), "Ana".into(), "one".into())
            .await
            .unwrap();

        let err = svc
            .signup("ana@example.com".into(), "Other".into(), "two".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists));
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn resolve_handles_every_failure_as_anonymous() {
        let svc = service().await;
        svc.signup("ana@example.com".into(), "Ana".into(), "s3cret".into())
            .await
            .unwrap();

        let good = format!("Basic {}", STANDARD.encode("ana@example.com:s3cret"));
        let wrong = format!("Basic {}", STANDARD.encode("ana@example.com:nope"));
        let unknown = format!("Basic {}", STANDARD.encode("bob@example.com:s3cret"));

        let user = svc.resolve(Some(&good)).await.unwrap().expect("principal");
        assert_eq!(user.email, "ana@example.com");

        assert!(svc.resolve(None).await.unwrap().is_none());
        assert!(svc.resolve(Some(&wrong)).await.unwrap().is_none());
        assert!(svc.resolve(Some(&unknown)).await.unwrap().is_none());
        assert!(svc.resolve(Some("Basic %%%")).await.unwrap().is_none());
    }
}
