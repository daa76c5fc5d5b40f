use crate::cache::FormsCache;
use crate::error::FormsError;
use actix_web::{web, HttpResponse};

/// Actix web handler for `DELETE /api/forms/{form_id}`.
pub async fn process(
    cache: web::Data<FormsCache>,
    form_id: web::Path<String>,
) -> Result<HttpResponse, FormsError> {
    cache.delete(&form_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
