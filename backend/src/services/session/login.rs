use crate::error::FormsError;
use crate::session::Session;
use actix_web::{web, HttpResponse};
use common::requests::LoginRequest;

/// Actix web handler for `POST /api/session`.
pub async fn process(
    session: web::Data<Session>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let LoginRequest { token, user } = body.into_inner();
    let token = token.trim();
    if token.is_empty() {
        return Err(FormsError::Invalid("Token de acesso é obrigatório.".to_string()).into());
    }
    session.login(token, &user)?;
    log::info!("session opened for {} ({})", user.name, user.role);
    Ok(HttpResponse::Ok().json(session.view()?))
}
