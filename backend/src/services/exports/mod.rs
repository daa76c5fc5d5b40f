//! # Export Service Module
//!
//! Downloads built from the forms: the whole snapshot as CSV or JSON, one
//! record as a formatted RNC PDF, and the monthly SST report.
//!
//! ## Sub-modules:
//! - `csv`, `json`: snapshot exports.
//! - `record_pdf`: single-record report, fetched fresh from the remote API.
//! - `monthly_pdf`: per-month aggregate report over the snapshot.
//! - `pdf_common`: fonts, layout helpers and the image pipeline.

mod csv;
mod json;
mod monthly_pdf;
mod pdf_common;
mod record_pdf;

use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Scope};

const API_PATH: &str = "/api/exports";

/// Configures and returns the Actix `Scope` for the export routes.
///
/// # Registered Routes:
///
/// *   **`GET /csv`**: `csv::process`, downloads `formularios.csv`.
/// *   **`GET /json`**: `json::process`, downloads `formularios.json`.
/// *   **`GET /pdf/{form_id}`**: `record_pdf::process`, downloads `RNC_{numero}.pdf`.
/// *   **`GET /monthly?period=MM/AAAA`**: `monthly_pdf::process`, downloads
///     `Relatorio_{Mes}_{Ano}.pdf`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/csv", get().to(csv::process))
        .route("/json", get().to(json::process))
        .route("/pdf/{form_id}", get().to(record_pdf::process))
        .route("/monthly", get().to(monthly_pdf::process))
}

/// `200 OK` download response. Non-ASCII names also get an RFC 5987
/// `filename*` parameter.
fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> HttpResponse {
    let mut parameters = vec![DispositionParam::Filename(file_name.to_string())];
    if !file_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }));
    }
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters,
        })
        .body(body)
}
