use crate::application::product_service::ProductService;
use crate::data::product_repository::SqliteProductRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::ProductForm;
use crate::presentation::views;
use actix_web::http::header;
use actix_web::{Error, HttpResponse, get, post, web};
use tera::Tera;

const LIST_PAGE: &str = "/purchases/";

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

fn back_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LIST_PAGE))
        .finish()
}

#[get("/")]
pub async fn home() -> HttpResponse {
    back_to_list()
}

#[get("/purchases")]
pub async fn list_redirect() -> HttpResponse {
    back_to_list()
}

#[get("/purchases/")]
pub async fn list_page(
    service: web::Data<ProductService<SqliteProductRepository>>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, DomainError> {
    let products = service.list_products().await?;
    Ok(html(views::render_list(&tera, &products)?))
}

#[post("/purchases")]
pub async fn create_from_form(
    service: web::Data<ProductService<SqliteProductRepository>>,
    form: web::Form<ProductForm>,
) -> Result<HttpResponse, DomainError> {
    service.create_product(form.into_inner().into()).await?;
    Ok(back_to_list())
}

#[get("/purchases/product/{id}")]
pub async fn show_page(
    service: web::Data<ProductService<SqliteProductRepository>>,
    tera: web::Data<Tera>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(html(views::render_detail(&tera, &product)?))
}

// Deletes on GET so the list page can use plain links. Repeating the request
// for a gone id yields 404.
#[get("/purchases/delete/{id}")]
pub async fn delete_link(
    service: web::Data<ProductService<SqliteProductRepository>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    service.delete_product(path.into_inner()).await?;
    Ok(back_to_list())
}

#[get("/purchases/edit/{id}")]
pub async fn edit_page(
    service: web::Data<ProductService<SqliteProductRepository>>,
    tera: web::Data<Tera>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(html(views::render_edit(&tera, &product)?))
}

// The form is only looked at once the id is known to exist, so a missing
// product is a 404 whatever was posted.
#[post("/purchases/edit/{id}")]
pub async fn edit_submit(
    service: web::Data<ProductService<SqliteProductRepository>>,
    path: web::Path<i64>,
    form: Result<web::Form<ProductForm>, Error>,
) -> Result<HttpResponse, Error> {
    let product_id = path.into_inner();
    service.get_product(product_id).await?;

    let form = form?.into_inner();
    service.replace_product(product_id, form.into()).await?;
    Ok(back_to_list())
}
