use actix_cors::Cors;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::config::AppConfig;
use crate::presentation::middleware::RequestId;

/// The principal resolved by `BasicAuthMiddleware`. Only available on
/// routes wrapped by it; elsewhere extraction fails with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthorized.into())),
        }
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

/// Malformed or incomplete JSON bodies become a 400 with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}

/// Ids are integers; anything else does not name a resource.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| actix_web::error::ErrorNotFound(err.to_string()))
}

/// Credentialed CORS only for origins named explicitly. A `*` entry opens the
/// API to any origin, and then the browser never attaches Basic credentials.
pub fn cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    config
        .cors_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}
