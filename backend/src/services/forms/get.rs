use crate::cache::FormsCache;
use crate::error::FormsError;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /api/forms/{form_id}`, served from the cache.
pub async fn process(
    cache: web::Data<FormsCache>,
    form_id: web::Path<String>,
) -> Result<HttpResponse, FormsError> {
    let form = cache.get_by_id(&form_id).await?;
    Ok(HttpResponse::Ok().json(form))
}
