//! # Single-record RNC report
//!
//! Renders one non-conformity report in the layout of the paper form:
//! header with logo and RNC number, dates, origin, responsible person, the
//! analysis and action-plan sections, up to two photos and signature lines.
//!
//! The record is fetched fresh from the remote API (`GET /formularios/{id}`)
//! since the listing may not carry every RNC field.

use crate::cache::FormsCache;
use crate::config::AppConfig;
use crate::error::ExportError;
use crate::services::exports::attachment;
use crate::services::exports::pdf_common::{
    configure_document, decode_data_url, field, image_element, logo_cell, page_decorator,
    push_framed_row, section_title, PdfAssets, MUTED,
};
use actix_web::{web, HttpResponse};
use common::model::form::{FormRecord, Photo, RncData};
use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element};
use tempfile::NamedTempFile;

const MAX_PHOTOS: usize = 2;
const PHOTO_WIDTH_MM: f64 = 85.0;
const PHOTO_HEIGHT_MM: f64 = 60.0;
const LOGO_WIDTH_MM: f64 = 26.0;
const LOGO_HEIGHT_MM: f64 = 16.0;

/// Actix web handler for `GET /api/exports/pdf/{form_id}`.
pub async fn process(
    cache: web::Data<FormsCache>,
    config: web::Data<AppConfig>,
    form_id: web::Path<String>,
) -> Result<HttpResponse, ExportError> {
    let form = cache.fetch(&form_id).await?;
    let file_name = record_file_name(&form);
    let assets = PdfAssets::from_config(&config);
    let bytes = tokio::task::spawn_blocking(move || render_record_pdf(&form, &assets))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;
    log::info!("rendered {} ({} bytes)", file_name, bytes.len());
    Ok(attachment("application/pdf", &file_name, bytes))
}

/// `RNC_{numero_rnc}.pdf`, or `RNC_Relatorio.pdf` when the record has no number.
pub fn record_file_name(form: &FormRecord) -> String {
    let number = form
        .rnc
        .as_ref()
        .and_then(|rnc| rnc.number.as_deref())
        .unwrap_or("Relatorio");
    format!("RNC_{}.pdf", number.replace(['/', '\\'], "-"))
}

pub fn render_record_pdf(form: &FormRecord, assets: &PdfAssets) -> Result<Vec<u8>, ExportError> {
    let empty = RncData::default();
    let rnc = form.rnc.as_ref().unwrap_or(&empty);
    let mut doc = configure_document(assets, "RNC - Relatório de Não Conformidade")?;
    doc.set_page_decorator(page_decorator());

    // Keep temporary files alive until rendering finishes
    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    let mut title = LinearLayout::vertical();
    title.push(
        Paragraph::new("RNC - RELATÓRIO DE NÃO CONFORMIDADE")
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(14))
            .padded(3),
    );
    push_framed_row(
        &mut doc,
        vec![
            (3, logo_cell(&assets.logo_path, LOGO_WIDTH_MM, LOGO_HEIGHT_MM, &mut temp_files)),
            (13, title),
            (3, field("Nº RNC", form.rnc_number())),
        ],
    )?;

    push_framed_row(
        &mut doc,
        vec![
            (1, field("Data de Abertura", rnc.opened_on.as_deref())),
            (1, field("Data de Fechamento", rnc.closed_on.as_deref())),
        ],
    )?;
    push_framed_row(
        &mut doc,
        vec![(
            1,
            field(
                "Origem da Não Conformidade",
                form.origin().map(|origin| origin.as_str()),
            ),
        )],
    )?;
    push_framed_row(
        &mut doc,
        vec![
            (1, field("Responsável", rnc.responsible_name.as_deref())),
            (1, field("Cargo", rnc.responsible_role.as_deref())),
            (1, field("Setor", rnc.responsible_sector.as_deref())),
            (1, field("Matrícula", rnc.responsible_registration.as_deref())),
        ],
    )?;

    doc.push(section_title("ANÁLISE"));
    push_framed_row(
        &mut doc,
        vec![(1, field("Descrição da Ocorrência", form.occurrence_description()))],
    )?;
    push_framed_row(
        &mut doc,
        vec![(
            1,
            field(
                "Causas Prováveis / Não Conformidade",
                rnc.nonconformity_description.as_deref(),
            ),
        )],
    )?;
    push_framed_row(
        &mut doc,
        vec![(
            1,
            field("Referências Normativas", rnc.normative_references.as_deref()),
        )],
    )?;

    doc.push(section_title("TOMADA DE AÇÕES"));
    push_framed_row(
        &mut doc,
        vec![
            (14, field("Ações Corretivas", rnc.corrective_actions.as_deref())),
            (5, field("Responsável", rnc.corrective_owner.as_deref())),
        ],
    )?;
    push_framed_row(
        &mut doc,
        vec![
            (14, field("Ações Preventivas", rnc.preventive_actions.as_deref())),
            (5, field("Responsável", rnc.preventive_owner.as_deref())),
        ],
    )?;

    doc.push(section_title("REGISTRO ICONOGRÁFICO"));
    push_photos(&mut doc, &rnc.photos, &mut temp_files)?;

    doc.push(Break::new(4));
    push_signatures(&mut doc)?;

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}

/// Photos side by side; a photo that cannot be decoded keeps only its caption.
fn push_photos(
    doc: &mut Document,
    photos: &[Photo],
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<(), ExportError> {
    let shown: Vec<&Photo> = photos
        .iter()
        .filter(|photo| photo.image_base64.as_deref().is_some_and(|b64| !b64.is_empty()))
        .take(MAX_PHOTOS)
        .collect();
    if shown.is_empty() {
        let mut cell = LinearLayout::vertical();
        cell.push(Break::new(2));
        cell.push(
            Paragraph::new("Nenhuma imagem registrada.")
                .aligned(Alignment::Center)
                .styled(Style::new().with_color(MUTED)),
        );
        cell.push(Break::new(2));
        return push_framed_row(doc, vec![(1, cell)]);
    }

    let mut cells = Vec::with_capacity(MAX_PHOTOS);
    for (index, photo) in shown.iter().enumerate() {
        let mut cell = LinearLayout::vertical();
        let image = photo
            .image_base64
            .as_deref()
            .map(decode_data_url)
            .transpose()
            .and_then(|bytes| match bytes {
                Some(bytes) => {
                    image_element(&bytes, PHOTO_WIDTH_MM, PHOTO_HEIGHT_MM, temp_files).map(Some)
                }
                None => Ok(None),
            });
        match image {
            Ok(Some(image)) => cell.push(image),
            Ok(None) => {}
            Err(e) => log::warn!("photo {} not embedded: {}", index + 1, e),
        }
        cell.push(
            Paragraph::new(format!(
                "Img {}: {}",
                index + 1,
                photo.caption.as_deref().unwrap_or("")
            ))
            .styled(Style::new().with_font_size(8)),
        );
        cells.push((1, cell));
    }
    while cells.len() < MAX_PHOTOS {
        cells.push((1, LinearLayout::vertical()));
    }
    push_framed_row(doc, cells)
}

fn push_signatures(doc: &mut Document) -> Result<(), ExportError> {
    let mut table = TableLayout::new(vec![8, 2, 8]);
    let signature = |label: &str| {
        let mut cell = LinearLayout::vertical();
        cell.push(Paragraph::new("_".repeat(40)));
        cell.push(Paragraph::new(label).styled(Style::new().with_font_size(8)));
        cell
    };
    table
        .row()
        .element(signature("Responsável pela Emissão"))
        .element(Paragraph::new(""))
        .element(signature("Gestão da Qualidade"))
        .push()?;
    doc.push(table);
    Ok(())
}
