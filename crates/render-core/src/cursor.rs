use crate::utils::check_fit;
use phishreport_types::Rect;

/// Fixed page dimensions and margins, in PDF points.
///
/// Layout coordinates grow downwards from the top edge; `utils::flip_y`
/// converts them for the PDF content stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with 40pt margins on every side.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 40.0,
    };

    pub fn top(&self) -> f32 {
        self.margin
    }

    /// The lowest y any content may reach.
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn left(&self) -> f32 {
        self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn printable_height(&self) -> f32 {
        self.bottom() - self.top()
    }

    /// The printable area as a rectangle in layout coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.left(),
            self.top(),
            self.content_width(),
            self.printable_height(),
        )
    }

    /// Baseline of the page footer, centred in the bottom margin.
    pub fn footer_baseline(&self) -> f32 {
        self.height - self.margin / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// The write position of one composition: which page, and how far down it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    pub page_index: usize,
    pub vertical_offset: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl DocumentCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            page_index: 0,
            vertical_offset: geometry.top(),
            page_width: geometry.width,
            page_height: geometry.height,
            margin: geometry.margin,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.page_width,
            height: self.page_height,
            margin: self.margin,
        }
    }

    /// Space left between the offset and the printable bottom.
    pub fn remaining(&self) -> f32 {
        (self.geometry().bottom() - self.vertical_offset).max(0.0)
    }

    pub fn is_at_page_top(&self) -> bool {
        (self.vertical_offset - self.geometry().top()).abs() < f32::EPSILON
    }

    /// Whether a block of `height` fits below the offset on the current page.
    pub fn fits(&self, height: f32) -> bool {
        let geometry = self.geometry();
        !check_fit(
            self.vertical_offset - geometry.top(),
            height,
            geometry.content_rect(),
        )
        .should_break
    }

    /// Whether a block of `height` would fit on an empty page.
    pub fn fits_on_fresh_page(&self, height: f32) -> bool {
        !check_fit(0.0, height, self.geometry().content_rect()).should_break
    }

    pub fn advance(&mut self, height: f32) {
        self.vertical_offset += height;
    }

    /// Moves to the top margin of the next page.
    pub fn break_page(&mut self) {
        self.page_index += 1;
        self.vertical_offset = self.geometry().top();
    }

    /// Breaks the page when `height` does not fit here but would fit on a
    /// fresh page. Returns whether a break happened.
    pub fn keep_together(&mut self, height: f32) -> bool {
        if !self.fits(height) && !self.is_at_page_top() && self.fits_on_fresh_page(height) {
            self.break_page();
            return true;
        }
        false
    }
}
