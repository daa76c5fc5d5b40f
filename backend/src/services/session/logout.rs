use crate::error::StoreError;
use crate::session::Session;
use actix_web::{web, HttpResponse};

/// Actix web handler for `DELETE /api/session`.
pub async fn process(session: web::Data<Session>) -> Result<HttpResponse, StoreError> {
    session.logout()?;
    log::info!("session closed");
    Ok(HttpResponse::NoContent().finish())
}
