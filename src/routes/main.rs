use actix_web::{HttpResponse, Responder, get};

use crate::paths::BOOKS;
use crate::routes::redirect;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect(BOOKS)
}

/// Liveness check; does not touch the upstream API.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}
