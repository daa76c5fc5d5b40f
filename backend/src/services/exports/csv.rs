use crate::cache::FormsCache;
use crate::error::ExportError;
use crate::services::exports::attachment;
use actix_web::{web, HttpResponse};
use chrono::SecondsFormat;
use common::model::form::FormRecord;

pub const FILE_NAME: &str = "formularios.csv";
const HEADER: [&str; 7] = [
    "ID",
    "Título",
    "Descrição",
    "Status",
    "Criado em",
    "Atualizado em",
    "Criado por",
];

/// Actix web handler for `GET /api/exports/csv`: the whole snapshot.
pub async fn process(cache: web::Data<FormsCache>) -> Result<HttpResponse, ExportError> {
    let snapshot = cache.get_all().await;
    let body = forms_csv(&snapshot)?;
    log::info!("exported {} forms as CSV", snapshot.len());
    Ok(attachment("text/csv; charset=utf-8", FILE_NAME, body))
}

/// One row per record, timestamps as RFC 3339 in UTC.
pub fn forms_csv(forms: &[FormRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for form in forms {
        let created = form.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let updated = form.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        writer.write_record([
            form.id.as_str(),
            form.title.as_str(),
            form.description.as_str(),
            form.status.as_str(),
            created.as_str(),
            updated.as_str(),
            form.creator_display_name(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
