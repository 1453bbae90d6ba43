use crate::cursor::DocumentCursor;
use phishreport_types::Rect;
use std::ops::Range;

const EPSILON: f32 = 0.01;

/// Vertical rhythm of report sections, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub title_size: f32,
    /// Title line plus the gap below it.
    pub title_height: f32,
    pub header_height: f32,
    pub row_height: f32,
    pub font_size: f32,
    pub cell_padding: f32,
    /// Space left after a section or card grid.
    pub section_gap: f32,
    pub cards_per_row: usize,
    pub card_height: f32,
    pub card_gap: f32,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            title_size: 13.0,
            title_height: 24.0,
            header_height: 20.0,
            row_height: 18.0,
            font_size: 9.0,
            cell_padding: 6.0,
            section_gap: 18.0,
            cards_per_row: 3,
            card_height: 62.0,
            card_gap: 12.0,
        }
    }
}

impl SectionStyle {
    /// Height of a table with `body_rows` rows drawn in one piece.
    pub fn table_height(&self, body_rows: usize) -> f32 {
        self.title_height + self.header_height + body_rows as f32 * self.row_height
    }

    pub fn card_grid_height(&self, cards: usize) -> f32 {
        let rows = cards.div_ceil(self.cards_per_row.max(1));
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.card_height + (rows - 1) as f32 * self.card_gap
    }
}

/// The part of a table drawn on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableChunk {
    pub page_index: usize,
    /// Layout y of the chunk's first line (title or header row).
    pub top: f32,
    /// Only the first chunk carries the section title.
    pub with_title: bool,
    /// Body rows drawn in this chunk.
    pub rows: Range<usize>,
}

impl TableChunk {
    pub fn header_top(&self, style: &SectionStyle) -> f32 {
        if self.with_title {
            self.top + style.title_height
        } else {
            self.top
        }
    }

    pub fn row_top(&self, style: &SectionStyle, row: usize) -> f32 {
        self.header_top(style)
            + style.header_height
            + (row - self.rows.start) as f32 * style.row_height
    }

    pub fn bottom(&self, style: &SectionStyle) -> f32 {
        self.header_top(style) + style.header_height + self.rows.len() as f32 * style.row_height
    }
}

/// Decides where each part of a table goes.
///
/// `body_rows` is the number of body rows to draw (an empty table still
/// draws its placeholder row, so callers pass at least 1). A table that fits
/// on a fresh page but not here is moved whole to the next page; a taller
/// table is split row by row and every continuation repeats the header.
///
/// Returns the chunks in page order and the cursor after the section.
pub fn plan_table(
    mut cursor: DocumentCursor,
    style: &SectionStyle,
    body_rows: usize,
) -> (Vec<TableChunk>, DocumentCursor) {
    let total = style.table_height(body_rows);

    if cursor.fits(total) || cursor.keep_together(total) {
        let chunk = TableChunk {
            page_index: cursor.page_index,
            top: cursor.vertical_offset,
            with_title: true,
            rows: 0..body_rows,
        };
        cursor.advance(total);
        return (vec![chunk], finish(cursor, style));
    }

    log::debug!(
        "Splitting table of {} rows ({:.1}pt) across pages from page {}",
        body_rows,
        total,
        cursor.page_index
    );

    // Title and header are never left alone at the bottom of a page.
    if !cursor.fits(style.table_height(1)) && !cursor.is_at_page_top() {
        cursor.break_page();
    }

    let mut chunks = Vec::new();
    let mut next = 0;
    while next < body_rows {
        let with_title = chunks.is_empty();
        let lead = if with_title {
            style.title_height + style.header_height
        } else {
            style.header_height
        };
        let room = ((cursor.remaining() - lead + EPSILON) / style.row_height).floor();
        let count = (room.max(1.0) as usize).min(body_rows - next);

        chunks.push(TableChunk {
            page_index: cursor.page_index,
            top: cursor.vertical_offset,
            with_title,
            rows: next..next + count,
        });
        cursor.advance(lead + count as f32 * style.row_height);
        next += count;

        if next < body_rows {
            cursor.break_page();
        }
    }

    (chunks, finish(cursor, style))
}

/// A card's page and box.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlacement {
    pub page_index: usize,
    pub rect: Rect,
}

/// Lays out `count` cards in rows of `style.cards_per_row`.
///
/// The grid is kept together when it fits on one page; otherwise each row
/// of cards moves to the next page on its own.
pub fn plan_cards(
    mut cursor: DocumentCursor,
    style: &SectionStyle,
    count: usize,
) -> (Vec<CardPlacement>, DocumentCursor) {
    if count == 0 {
        return (Vec::new(), cursor);
    }

    cursor.keep_together(style.card_grid_height(count));

    let per_row = style.cards_per_row.max(1);
    let geometry = cursor.geometry();
    let gaps = (per_row - 1) as f32 * style.card_gap;
    let card_width = (geometry.content_width() - gaps) / per_row as f32;

    let mut placements = Vec::with_capacity(count);
    for (row_index, row_start) in (0..count).step_by(per_row).enumerate() {
        if row_index > 0 {
            cursor.advance(style.card_gap);
        }
        if !cursor.fits(style.card_height) && !cursor.is_at_page_top() {
            cursor.break_page();
        }
        for slot in 0..per_row.min(count - row_start) {
            placements.push(CardPlacement {
                page_index: cursor.page_index,
                rect: Rect::new(
                    geometry.left() + slot as f32 * (card_width + style.card_gap),
                    cursor.vertical_offset,
                    card_width,
                    style.card_height,
                ),
            });
        }
        cursor.advance(style.card_height);
    }

    (placements, finish(cursor, style))
}

fn finish(mut cursor: DocumentCursor, style: &SectionStyle) -> DocumentCursor {
    cursor.advance(style.section_gap.min(cursor.remaining()));
    cursor
}
