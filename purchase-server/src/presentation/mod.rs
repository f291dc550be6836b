pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod utils;
pub mod views;


use actix_web::web;

use crate::presentation::middleware::BasicAuthMiddleware;
use crate::presentation::utils::{form_config, json_config, path_config};

/// Route table shared by the server and the tests. Services are expected in
/// app data: `AuthService<SqliteUserRepository>` and
/// `ProductService<SqliteProductRepository>`, each wrapped in `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(form_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .service(handlers::user::signup)
                .service(handlers::user::list_users)
                .service(
                    web::resource("/profile")
                        .wrap(BasicAuthMiddleware)
                        .route(web::get().to(handlers::user::profile)),
                )
                .service(
                    web::resource("/protected")
                        .wrap(BasicAuthMiddleware)
                        .route(web::get().to(handlers::user::protected)),
                )
                .service(handlers::purchase::list_products)
                .service(handlers::purchase::create_product)
                .service(handlers::purchase::get_product)
                .service(handlers::purchase::replace_product)
                .service(handlers::purchase::delete_product),
        )
        .service(handlers::pages::home)
        .service(handlers::pages::list_redirect)
        .service(handlers::pages::list_page)
        .service(handlers::pages::create_from_form)
        .service(handlers::pages::show_page)
        .service(handlers::pages::delete_link)
        .service(handlers::pages::edit_page)
        .service(handlers::pages::edit_submit);
}
