use crate::cache::FormsCache;
use crate::error::FormsError;
use actix_web::{web, HttpResponse};
use common::model::form::FormPatch;

/// Actix web handler for `PUT /api/forms/{form_id}`.
///
/// Returns the record as the server stored it.
pub async fn process(
    cache: web::Data<FormsCache>,
    form_id: web::Path<String>,
    patch: web::Json<FormPatch>,
) -> Result<HttpResponse, FormsError> {
    let updated = cache.update(&form_id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}
