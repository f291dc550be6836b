pub mod pages;
pub mod purchase;
pub mod user;

use crate::presentation::dto::HealthResponse;
use actix_web::{HttpResponse, Responder};
use chrono::Utc;

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
