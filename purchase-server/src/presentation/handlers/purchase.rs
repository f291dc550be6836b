use crate::application::product_service::ProductService;
use crate::data::product_repository::SqliteProductRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::ProductRequest;
use crate::presentation::utils::request_id;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;

// Bodies are taken raw and parsed here rather than by the `Json` extractor:
// create echoes the exact bytes, replace checks the id before the body.
fn parse_product(body: &[u8]) -> Result<ProductRequest, DomainError> {
    serde_json::from_slice(body).map_err(|e| DomainError::Validation(e.to_string()))
}

#[get("/purchases")]
pub async fn list_products(
    service: web::Data<ProductService<SqliteProductRepository>>,
) -> Result<HttpResponse, DomainError> {
    let products = service.list_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// Answers with the submitted body byte for byte, not the stored row; callers
/// wanting the assigned id or creation date have to list or fetch.
#[post("/purchases")]
pub async fn create_product(
    req: HttpRequest,
    service: web::Data<ProductService<SqliteProductRepository>>,
    body: web::Bytes,
) -> Result<HttpResponse, DomainError> {
    let product = service
        .create_product(parse_product(&body)?.into())
        .await?;

    info!(
        request_id = %request_id(&req),
        product_id = product.id,
        "product created"
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

#[get("/purchases/{id}")]
pub async fn get_product(
    service: web::Data<ProductService<SqliteProductRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[put("/purchases/{id}")]
pub async fn replace_product(
    req: HttpRequest,
    service: web::Data<ProductService<SqliteProductRepository>>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, DomainError> {
    let product_id = path.into_inner();
    service.get_product(product_id).await?;

    let fields = parse_product(&body)?.into();
    service.replace_product(product_id, fields).await?;

    info!(
        request_id = %request_id(&req),
        product_id,
        "product replaced"
    );

    Ok(HttpResponse::Ok().json(""))
}

#[delete("/purchases/{id}")]
pub async fn delete_product(
    req: HttpRequest,
    service: web::Data<ProductService<SqliteProductRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let product_id = path.into_inner();
    service.delete_product(product_id).await?;

    info!(
        request_id = %request_id(&req),
        product_id,
        "product deleted"
    );

    Ok(HttpResponse::Ok().json(""))
}
