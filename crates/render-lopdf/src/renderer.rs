use crate::canvas::PageSet;
use crate::writer::LOGO_RESOURCE;
use phishreport_render_core::{
    Align, CardSpec, DocumentCursor, FontFace, RenderError, SectionSpec, SectionStyle, TableChunk,
    plan_cards, plan_table, status_color, truncate_to_width,
};
use phishreport_types::{Color, Rect, Size};

const HEADER_BAND_HEIGHT: f32 = 64.0;
const HEADER_PADDING: f32 = 10.0;
const LOGO_MAX_WIDTH: f32 = 120.0;
const CARD_ACCENT_WIDTH: f32 = 4.0;

/// The report header band.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSpec {
    pub title: String,
    /// Second line, typically the generation timestamp.
    pub subtitle: String,
    pub accent: Color,
}

/// Draws the header band at the cursor, with the logo on the left when one
/// is embedded.
///
/// `logo` is the logo's pixel size; it is scaled to the band height keeping
/// its aspect ratio. The band is kept together on one page.
pub fn render_header(
    pages: &mut PageSet,
    mut cursor: DocumentCursor,
    style: &SectionStyle,
    header: &HeaderSpec,
    logo: Option<Size>,
) -> DocumentCursor {
    cursor.keep_together(HEADER_BAND_HEIGHT);
    let geometry = pages.geometry();
    let band = Rect::new(
        geometry.left(),
        cursor.vertical_offset,
        geometry.content_width(),
        HEADER_BAND_HEIGHT,
    );
    let canvas = pages.page(cursor.page_index);
    canvas.fill_rect(band, header.accent);

    let mut text_left = band.x + HEADER_PADDING;
    if let Some(pixels) = logo {
        let fitted = pixels.fit_within(Size::new(
            LOGO_MAX_WIDTH,
            HEADER_BAND_HEIGHT - 2.0 * HEADER_PADDING,
        ));
        if fitted.width > 0.0 {
            let rect = Rect::new(
                text_left,
                band.y + (band.height - fitted.height) / 2.0,
                fitted.width,
                fitted.height,
            );
            canvas.image(LOGO_RESOURCE, rect);
            text_left = rect.right() + HEADER_PADDING;
        }
    }

    let text_width = band.right() - HEADER_PADDING - text_left;
    let title_size = 16.0;
    let title = truncate_to_width(&header.title, FontFace::Bold, title_size, text_width);
    canvas.text(
        text_left,
        band.y + 28.0,
        FontFace::Bold,
        title_size,
        Color::WHITE,
        &title,
    );
    let subtitle = truncate_to_width(
        &header.subtitle,
        FontFace::Regular,
        style.font_size,
        text_width,
    );
    canvas.text(
        text_left,
        band.y + 46.0,
        FontFace::Regular,
        style.font_size,
        Color::WHITE,
        &subtitle,
    );

    cursor.advance(HEADER_BAND_HEIGHT + style.section_gap);
    cursor
}

/// Draws metric cards in a grid at the cursor.
pub fn render_cards(
    pages: &mut PageSet,
    cursor: DocumentCursor,
    style: &SectionStyle,
    cards: &[CardSpec],
) -> DocumentCursor {
    let (placements, after) = plan_cards(cursor, style, cards.len());
    for (card, placement) in cards.iter().zip(placements) {
        let rect = placement.rect;
        let canvas = pages.page(placement.page_index);
        canvas.fill_rect(rect, Color::BAND);
        canvas.fill_rect(
            Rect::new(rect.x, rect.y, CARD_ACCENT_WIDTH, rect.height),
            card.accent,
        );

        let left = rect.x + CARD_ACCENT_WIDTH + style.cell_padding;
        let width = rect.width - CARD_ACCENT_WIDTH - 2.0 * style.cell_padding;
        let label = truncate_to_width(&card.label, FontFace::Regular, 8.5, width);
        canvas.text(left, rect.y + 18.0, FontFace::Regular, 8.5, Color::MUTED, &label);
        let value = truncate_to_width(&card.value, FontFace::Bold, 18.0, width);
        canvas.text(left, rect.y + 45.0, FontFace::Bold, 18.0, card.accent, &value);
    }
    after
}

/// Draws a titled table at the cursor and returns the cursor after it.
///
/// A table that does not fit in the remaining space but fits on a fresh page
/// is moved whole to the next page. Taller tables are split row by row with
/// the header repeated. Even rows are banded, cells that overflow their
/// column end in `...`, and the status column is drawn bold in the status
/// colour. An empty table draws its `empty_message` as the only row.
pub fn render_section(
    pages: &mut PageSet,
    cursor: DocumentCursor,
    style: &SectionStyle,
    section: &SectionSpec,
) -> Result<DocumentCursor, RenderError> {
    if section.columns.is_empty() {
        return Err(RenderError::Layout(format!(
            "section '{}' has no columns",
            section.title
        )));
    }

    let body_rows = section.rows.len().max(1);
    let (chunks, after) = plan_table(cursor, style, body_rows);
    log::debug!(
        "Section '{}': {} rows over {} page(s)",
        section.title,
        section.rows.len(),
        chunks.len()
    );

    for chunk in &chunks {
        draw_chunk(pages, style, section, chunk);
    }
    Ok(after)
}

fn draw_chunk(
    pages: &mut PageSet,
    style: &SectionStyle,
    section: &SectionSpec,
    chunk: &TableChunk,
) {
    let geometry = pages.geometry();
    let left = geometry.left();
    let table_width = geometry.content_width();
    let widths = section.column_widths(table_width);
    let canvas = pages.page(chunk.page_index);

    if chunk.with_title {
        let title =
            truncate_to_width(&section.title, FontFace::Bold, style.title_size, table_width);
        canvas.text(
            left,
            chunk.top + style.title_size,
            FontFace::Bold,
            style.title_size,
            Color::NAVY,
            &title,
        );
    }

    let header_top = chunk.header_top(style);
    canvas.fill_rect(
        Rect::new(left, header_top, table_width, style.header_height),
        Color::HEADER,
    );
    let mut x = left;
    for (column, width) in section.columns.iter().zip(&widths) {
        let cell = Rect::new(x, header_top, *width, style.header_height);
        let text = truncate_to_width(
            &column.header,
            FontFace::Bold,
            style.font_size,
            width - 2.0 * style.cell_padding,
        );
        canvas.cell_text(
            cell,
            column.align,
            style.cell_padding,
            FontFace::Bold,
            style.font_size,
            Color::SLATE,
            &text,
        );
        x += width;
    }

    for row in chunk.rows.clone() {
        let top = chunk.row_top(style, row);
        if row % 2 == 0 {
            canvas.fill_rect(
                Rect::new(left, top, table_width, style.row_height),
                Color::BAND,
            );
        }

        if section.rows.is_empty() {
            let cell = Rect::new(left, top, table_width, style.row_height);
            canvas.cell_text(
                cell,
                Align::Left,
                style.cell_padding,
                FontFace::Regular,
                style.font_size,
                Color::MUTED,
                &section.empty_message,
            );
            continue;
        }

        let mut x = left;
        for (index, (column, width)) in section.columns.iter().zip(&widths).enumerate() {
            let raw = section.cell(row, index);
            let status = if section.status_column == Some(index) {
                status_color(raw)
            } else {
                None
            };
            let (face, color) = match status {
                Some(color) => (FontFace::Bold, color),
                None => (FontFace::Regular, Color::SLATE),
            };
            let text =
                truncate_to_width(raw, face, style.font_size, width - 2.0 * style.cell_padding);
            let cell = Rect::new(x, top, *width, style.row_height);
            canvas.cell_text(
                cell,
                column.align,
                style.cell_padding,
                face,
                style.font_size,
                color,
                &text,
            );
            x += width;
        }
    }

    let bottom = chunk.bottom(style);
    canvas.line((left, bottom), (left + table_width, bottom), Color::HEADER, 0.5);
}
