//! # Monthly SST report
//!
//! Aggregates the records created in one local calendar month into a PDF:
//! title and period, generation date, summary boxes and the detail table.
//! Works on the cached snapshot; refresh first for up-to-date numbers.

use crate::cache::FormsCache;
use crate::config::AppConfig;
use crate::error::ExportError;
use crate::services::exports::attachment;
use crate::services::exports::pdf_common::{
    configure_document, logo_cell, page_decorator, PdfAssets, MUTED,
};
use actix_web::{web, HttpResponse};
use chrono::Local;
use common::engine::{MonthlyReport, MonthlySelection};
use common::requests::MonthlyQuery;
use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, Paragraph, TableLayout};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element};
use tempfile::NamedTempFile;

const LOGO_SIZE_MM: f64 = 25.0;
const TOTAL_COLOR: Color = Color::Rgb(52, 73, 94);
const COMPLETED_COLOR: Color = Color::Rgb(40, 167, 69);
const PENDING_COLOR: Color = Color::Rgb(255, 193, 7);

/// Actix web handler for `GET /api/exports/monthly?period=MM/AAAA`.
/// Without `period` the current month is used.
pub async fn process(
    cache: web::Data<FormsCache>,
    config: web::Data<AppConfig>,
    query: web::Query<MonthlyQuery>,
) -> Result<HttpResponse, ExportError> {
    let selection = match query.period.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(period) => MonthlySelection::parse(period).map_err(ExportError::Invalid)?,
        None => MonthlySelection::current(),
    };
    let snapshot = cache.get_all().await;
    let report = MonthlyReport::build(&snapshot, selection);
    let generated_on = Local::now().format("%d/%m/%Y").to_string();
    let assets = PdfAssets::from_config(&config);

    let rows = report.rows.len();
    let bytes = tokio::task::spawn_blocking(move || {
        render_monthly_pdf(&report, &generated_on, &assets)
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))??;
    log::info!(
        "rendered monthly report {} with {} records",
        selection.period_label(),
        rows
    );
    Ok(attachment("application/pdf", &selection.file_name(), bytes))
}

pub fn render_monthly_pdf(
    report: &MonthlyReport,
    generated_on: &str,
    assets: &PdfAssets,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = configure_document(assets, "Relatório Mensal de SST")?;
    let mut decorator = page_decorator();
    decorator.set_header(|page| {
        Paragraph::new(format!("Página {}", page))
            .aligned(Alignment::Right)
            .styled(Style::new().with_font_size(8).with_color(MUTED))
    });
    doc.set_page_decorator(decorator);

    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    let mut heading = LinearLayout::vertical();
    heading.push(
        Paragraph::new("RELATÓRIO MENSAL DE SST").styled(Style::new().bold().with_font_size(16)),
    );
    heading.push(
        Paragraph::new(format!("Período: {}", report.selection.period_label()))
            .styled(Style::new().with_font_size(12)),
    );
    heading.push(
        Paragraph::new(format!("Gerado em: {}", generated_on))
            .styled(Style::new().with_font_size(12)),
    );
    let mut header = TableLayout::new(vec![1, 5]);
    header
        .row()
        .element(logo_cell(&assets.logo_path, LOGO_SIZE_MM, LOGO_SIZE_MM, &mut temp_files))
        .element(heading.padded(2))
        .push()?;
    doc.push(header);
    doc.push(Break::new(2));

    let summary = &report.summary;
    let mut boxes = TableLayout::new(vec![4, 1, 4, 1, 4, 4]);
    boxes
        .row()
        .element(stat_box("TOTAL", summary.total, TOTAL_COLOR))
        .element(Paragraph::new(""))
        .element(stat_box("CONCLUÍDOS", summary.completed, COMPLETED_COLOR))
        .element(Paragraph::new(""))
        .element(stat_box("PENDENTES", summary.pending, PENDING_COLOR))
        .element(Paragraph::new(""))
        .push()?;
    doc.push(boxes);
    doc.push(Break::new(2));

    doc.push(
        Paragraph::new("Detalhamento dos Registros").styled(Style::new().bold().with_font_size(12)),
    );
    doc.push(Break::new(1));

    if report.rows.is_empty() {
        doc.push(Paragraph::new("Nenhum registro encontrado neste período."));
    } else {
        let mut table = TableLayout::new(vec![3, 5, 7, 3, 3]);
        table.set_cell_decorator(FrameCellDecorator::new(false, true, false));
        let bold = Style::new().bold();
        let mut head = table.row();
        for title in ["Data", "Título", "Ocorrência", "Status", "Responsável"] {
            head.push_element(Paragraph::new(title).styled(bold).padded(1));
        }
        head.push()?;
        for row in &report.rows {
            table
                .row()
                .element(Paragraph::new(row.created_on.as_str()).padded(1))
                .element(Paragraph::new(row.title.as_str()).padded(1))
                .element(Paragraph::new(row.origin.as_str()).padded(1))
                .element(Paragraph::new(row.status.as_str()).padded(1))
                .element(Paragraph::new(row.responsible.as_str()).padded(1))
                .push()?;
        }
        doc.push(table);
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}

fn stat_box(title: &str, value: usize, color: Color) -> impl Element {
    let mut cell = LinearLayout::vertical();
    cell.push(
        Paragraph::new(title)
            .aligned(Alignment::Center)
            .styled(Style::new().with_font_size(10).with_color(color)),
    );
    cell.push(
        Paragraph::new(value.to_string())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(16).with_color(color)),
    );
    cell.padded(2).framed()
}
