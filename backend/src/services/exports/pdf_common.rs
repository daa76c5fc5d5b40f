//! Building blocks shared by the record and monthly PDF reports: font and
//! document setup, framed field boxes, and the image pipeline that turns a
//! base64 photo or the logo into something genpdf can embed.

use crate::config::AppConfig;
use crate::error::ExportError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use genpdf::elements::{FrameCellDecorator, Image as PdfImage, LinearLayout, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{Document, Element, PaperSize, SimplePageDecorator};
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const IMAGE_DPI: f64 = 150.0;
const MM_PER_INCH: f64 = 25.4;
pub const MUTED: Color = Color::Rgb(150, 150, 150);

/// Files the reports read from disk.
#[derive(Debug, Clone)]
pub struct PdfAssets {
    pub fonts_dir: PathBuf,
    pub logo_path: PathBuf,
}

impl PdfAssets {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fonts_dir: config.fonts_dir.clone(),
            logo_path: config.logo_path.clone(),
        }
    }
}

/// Loads Arial from `fonts_dir`, falling back to LiberationSans.
fn load_font(fonts_dir: &Path) -> Result<FontFamily<FontData>, ExportError> {
    if let Ok(family) = genpdf::fonts::from_files(fonts_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(fonts_dir, "LiberationSans", None).map_err(ExportError::from)
}

/// A4 document with the report font; callers install their own decorator.
pub fn configure_document(assets: &PdfAssets, title: &str) -> Result<Document, ExportError> {
    let mut doc = Document::new(load_font(&assets.fonts_dir)?);
    doc.set_title(title);
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(9);
    doc.set_line_spacing(1.1);
    Ok(doc)
}

pub fn page_decorator() -> SimplePageDecorator {
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(10);
    decorator
}

/// Small uppercase label with the value below it, one paragraph per line.
pub fn field(label: &str, value: Option<&str>) -> LinearLayout {
    let mut cell = LinearLayout::vertical();
    cell.push(Paragraph::new(label.to_uppercase()).styled(Style::new().bold().with_font_size(7)));
    for line in value.unwrap_or("").split('\n') {
        cell.push(Paragraph::new(line).styled(Style::new().with_font_size(9)));
    }
    cell
}

/// Pushes one row of framed cells, each with its relative column width.
pub fn push_framed_row(
    doc: &mut Document,
    cells: Vec<(usize, LinearLayout)>,
) -> Result<(), ExportError> {
    let mut table = TableLayout::new(cells.iter().map(|(weight, _)| *weight).collect());
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    let mut row = table.row();
    for (_, cell) in cells {
        row.push_element(cell.padded(1));
    }
    row.push()?;
    doc.push(table);
    Ok(())
}

/// Bold framed band separating report sections.
pub fn section_title(text: &str) -> impl Element {
    Paragraph::new(text)
        .styled(Style::new().bold().with_font_size(9))
        .padded(1)
        .framed()
}

/// Strips a `data:image/...;base64,` prefix if present and decodes the rest.
pub fn decode_data_url(raw: &str) -> Result<Vec<u8>, ExportError> {
    let payload = match raw.split_once(',') {
        Some((head, data)) if head.starts_with("data:") => data,
        _ => raw,
    };
    Ok(BASE64.decode(payload.trim())?)
}

fn mm_to_px(mm: f64) -> f64 {
    mm / MM_PER_INCH * IMAGE_DPI
}

/// Scales `img` down (never up) to fit a `max_w` x `max_h` pixel box.
pub fn fit_image(img: DynamicImage, max_w: f64, max_h: f64) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    let scale = (max_w / orig_w as f64)
        .min(max_h / orig_h as f64)
        .min(1.0);
    if scale >= 1.0 {
        return img;
    }
    let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
    let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
    img.resize(new_w, new_h, FilterType::Lanczos3)
}

/// Flattens alpha over white and writes an 8-bit RGB PNG to a temp file.
fn write_rgb_png(img: &DynamicImage) -> Result<NamedTempFile, ExportError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let mut encoder = PngEncoder::new(tmp.as_file_mut(), w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }
    Ok(tmp)
}

/// Prepares encoded image bytes for embedding within a box of the given
/// size in millimetres. The temp file backing the element is pushed onto
/// `temp_files` and must outlive the render.
pub fn image_element(
    bytes: &[u8],
    max_width_mm: f64,
    max_height_mm: f64,
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<PdfImage, ExportError> {
    let img = fit_image(
        load_from_memory(bytes)?,
        mm_to_px(max_width_mm),
        mm_to_px(max_height_mm),
    );
    let tmp = write_rgb_png(&img)?;
    let mut element = PdfImage::from_path(tmp.path())?;
    element.set_dpi(IMAGE_DPI);
    temp_files.push(tmp);
    Ok(element)
}

/// Logo cell; shows a `LOGO` placeholder when the file is missing or unreadable.
pub fn logo_cell(
    logo_path: &Path,
    max_width_mm: f64,
    max_height_mm: f64,
    temp_files: &mut Vec<NamedTempFile>,
) -> LinearLayout {
    let mut cell = LinearLayout::vertical();
    let logo = std::fs::read(logo_path)
        .map_err(ExportError::from)
        .and_then(|bytes| image_element(&bytes, max_width_mm, max_height_mm, temp_files));
    match logo {
        Ok(image) => cell.push(image),
        Err(e) => {
            log::debug!("logo {} not embedded: {}", logo_path.display(), e);
            cell.push(Paragraph::new("LOGO").styled(Style::new().with_font_size(8)));
        }
    }
    cell
}
