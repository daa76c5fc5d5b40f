use crate::cache::FormsCache;
use crate::error::ExportError;
use crate::services::exports::attachment;
use actix_web::{web, HttpResponse};

pub const FILE_NAME: &str = "formularios.json";

/// Actix web handler for `GET /api/exports/json`: the snapshot, pretty-printed,
/// with every field the remote API sent.
pub async fn process(cache: web::Data<FormsCache>) -> Result<HttpResponse, ExportError> {
    let snapshot = cache.get_all().await;
    let body = serde_json::to_vec_pretty(snapshot.as_slice())?;
    log::info!("exported {} forms as JSON", snapshot.len());
    Ok(attachment("application/json", FILE_NAME, body))
}
