use crate::application::auth_service::AuthService;
use crate::data::user_repository::SqliteUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{SignupRequest, UserResponse};
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[post("/signup")]
pub async fn signup(
    req: HttpRequest,
    service: web::Data<AuthService<SqliteUserRepository>>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, DomainError> {
    let SignupRequest {
        email,
        name,
        password,
    } = payload.into_inner();
    let user = service.signup(email, name, password).await?;

    info!(
        request_id = %request_id(&req),
        user_id = user.id,
        email = %user.email,
        "user registered"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[get("/signup")]
pub async fn list_users(
    service: web::Data<AuthService<SqliteUserRepository>>,
) -> Result<HttpResponse, DomainError> {
    let users: Vec<UserResponse> = service
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Protected: mounted behind `BasicAuthMiddleware`.
pub async fn profile(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// Protected: mounted behind `BasicAuthMiddleware`.
pub async fn protected(req: HttpRequest, user: AuthenticatedUser) -> HttpResponse {
    info!(
        request_id = %request_id(&req),
        user_id = user.id,
        "protected data served"
    );
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("protected data")
}
