use crate::error::StoreError;
use crate::session::Session;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /api/session`.
pub async fn process(session: web::Data<Session>) -> Result<HttpResponse, StoreError> {
    Ok(HttpResponse::Ok().json(session.view()?))
}
