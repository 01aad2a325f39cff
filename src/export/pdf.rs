//! PDF table export.
//!
//! Each day starts on a new page titled `"Compliance check {day}"`,
//! followed by a table over the export column union. Rows that do not fit
//! continue on further pages with the header row repeated. Text is set in
//! the standard Helvetica fonts, so characters outside WinAnsi are shown
//! as `?` and cells wider than their column are cut with `...`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::config::PdfLayout;
use crate::error::ComplianceResult;
use crate::models::{CellValue, DayResult};

use super::{ExportArtifact, ExportFormat, ExportTable};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

// Average Helvetica glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// One physical page: a title and the slice rows that fit on it.
struct PageSpec<'a> {
    title: String,
    rows: &'a [Vec<CellValue>],
}

/// Writes one page (or more, for long days) per day.
pub fn export_pdf(
    label: &str,
    days: &[&DayResult],
    layout: &PdfLayout,
) -> ComplianceResult<ExportArtifact> {
    let table = ExportTable::build(days);
    let pages = paginate(&table, layout);
    let bytes = write_document(&table.columns, &pages, layout);
    Ok(ExportArtifact::new(label, ExportFormat::Pdf, bytes))
}

fn rows_per_page(layout: &PdfLayout) -> usize {
    let usable = layout.page_height
        - 2.0 * layout.margin
        - layout.title_font_size * 2.0
        - layout.row_height;
    ((usable / layout.row_height).floor() as usize).max(1)
}

fn paginate<'a>(table: &'a ExportTable, layout: &PdfLayout) -> Vec<PageSpec<'a>> {
    let per_page = rows_per_page(layout);
    let mut pages = Vec::new();
    for sheet in &table.sheets {
        let title = format!("Compliance check {}", sheet.day);
        if sheet.rows.is_empty() {
            pages.push(PageSpec { title, rows: &[] });
            continue;
        }
        for (part, chunk) in sheet.rows.chunks(per_page).enumerate() {
            let title = if part == 0 {
                title.clone()
            } else {
                format!("{} (continued)", title)
            };
            pages.push(PageSpec { title, rows: chunk });
        }
    }
    pages
}

fn write_document(columns: &[String], pages: &[PageSpec<'_>], layout: &PdfLayout) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(page_ids.len() as i32);

    for (spec, &(page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();

        let content = draw_page(columns, spec, layout);
        pdf.stream(content_id, &content);
    }

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.finish()
}

fn draw_page(columns: &[String], spec: &PageSpec<'_>, layout: &PdfLayout) -> Vec<u8> {
    let left = layout.margin;
    let right = layout.page_width - layout.margin;
    let column_width = if columns.is_empty() {
        right - left
    } else {
        (right - left) / columns.len() as f32
    };
    let max_chars = ((column_width - 2.0) / (layout.font_size * AVERAGE_GLYPH_WIDTH))
        .floor()
        .max(1.0) as usize;

    let mut content = Content::new();

    let mut y = layout.page_height - layout.margin - layout.title_font_size;
    write_text(&mut content, BOLD_FONT, layout.title_font_size, left, y, &spec.title);

    y -= layout.title_font_size * 2.0;
    for (index, column) in columns.iter().enumerate() {
        let x = left + index as f32 * column_width;
        write_text(&mut content, BOLD_FONT, layout.font_size, x, y, &fit(column, max_chars));
    }

    let rule_y = y - layout.row_height + layout.font_size;
    content.set_line_width(0.5);
    content.move_to(left, rule_y);
    content.line_to(right, rule_y);
    content.stroke();

    for row in spec.rows {
        y -= layout.row_height;
        for (index, cell) in row.iter().enumerate() {
            let text = fit(&cell.display(), max_chars);
            if text.is_empty() {
                continue;
            }
            let x = left + index as f32 * column_width;
            write_text(&mut content, REGULAR_FONT, layout.font_size, x, y, &text);
        }
    }

    content.finish()
}

fn write_text(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, text: &str) {
    let encoded = encode_win_ansi(text);
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&encoded));
    content.end_text();
}

// Newlines collapse to spaces; the cell is one line.
fn fit(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        return flat;
    }
    if max_chars <= 3 {
        return flat.chars().take(max_chars).collect();
    }
    let mut cut: String = flat.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

// WinAnsi matches Latin-1 for printable ASCII and U+00A0..=U+00FF.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
