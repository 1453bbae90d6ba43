use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use phishreport_render_core::metrics::encode_win_ansi;
use phishreport_render_core::utils::flip_y;
use phishreport_render_core::{Align, FontFace, PageGeometry, RenderError, text_width};
use phishreport_types::{Color, Rect};

/// Drawing operations for one page, addressed in layout coordinates
/// (origin at the top-left corner, y growing downwards).
#[derive(Debug, Clone)]
pub struct PageCanvas {
    page_height: f32,
    operations: Vec<Operation>,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn set_fill(&mut self, color: Color) {
        let [r, g, b] = color.components();
        self.operations
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    }

    fn set_stroke(&mut self, color: Color) {
        let [r, g, b] = color.components();
        self.operations
            .push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.operations.push(Operation::new("q", vec![]));
        self.set_fill(color);
        self.operations.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                flip_y(rect.bottom(), self.page_height).into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        self.operations.push(Operation::new("f", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.operations.push(Operation::new("q", vec![]));
        self.set_stroke(color);
        self.operations.push(Operation::new("w", vec![width.into()]));
        self.operations.push(Operation::new(
            "m",
            vec![from.0.into(), flip_y(from.1, self.page_height).into()],
        ));
        self.operations.push(Operation::new(
            "l",
            vec![to.0.into(), flip_y(to.1, self.page_height).into()],
        ));
        self.operations.push(Operation::new("S", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    /// Draws `text` with its baseline at layout y `baseline`.
    pub fn text(
        &mut self,
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
        color: Color,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![face.resource_name().into(), size.into()],
        ));
        self.set_fill(color);
        self.operations.push(Operation::new(
            "Td",
            vec![x.into(), flip_y(baseline, self.page_height).into()],
        ));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    /// Draws `text` on one line inside `cell`, vertically centred.
    #[allow(clippy::too_many_arguments)]
    pub fn cell_text(
        &mut self,
        cell: Rect,
        align: Align,
        padding: f32,
        face: FontFace,
        size: f32,
        color: Color,
        text: &str,
    ) {
        let width = text_width(text, face, size);
        let x = match align {
            Align::Left => cell.x + padding,
            Align::Right => cell.right() - padding - width,
            Align::Center => cell.x + (cell.width - width) / 2.0,
        };
        // Helvetica cap height is roughly 0.7em; centre on that.
        let baseline = cell.y + cell.height / 2.0 + size * 0.35;
        self.text(x, baseline, face, size, color, text);
    }

    /// Paints the image XObject `name` into `rect`.
    pub fn image(&mut self, name: &str, rect: Rect) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                flip_y(rect.bottom(), self.page_height).into(),
            ],
        ));
        self.operations
            .push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    pub fn encode(self) -> Result<Vec<u8>, RenderError> {
        Content {
            operations: self.operations,
        }
        .encode()
        .map_err(RenderError::from)
    }
}

/// The pages of one composition, created on demand as sections flow down.
#[derive(Debug, Clone)]
pub struct PageSet {
    geometry: PageGeometry,
    pages: Vec<PageCanvas>,
}

impl PageSet {
    /// Starts with a single empty page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![PageCanvas::new(geometry.height)],
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// The canvas for `index`, adding blank pages up to it if needed.
    pub fn page(&mut self, index: usize) -> &mut PageCanvas {
        while self.pages.len() <= index {
            self.pages.push(PageCanvas::new(self.geometry.height));
        }
        &mut self.pages[index]
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn into_pages(self) -> Vec<PageCanvas> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_set_grows_on_demand() {
        let mut pages = PageSet::new(PageGeometry::A4);
        assert_eq!(pages.len(), 1);
        pages.page(2).fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(pages.len(), 3);
        assert!(pages.page(1).is_empty());
    }

    #[test]
    fn test_text_flips_y_and_encodes() {
        let mut canvas = PageCanvas::new(800.0);
        canvas.text(40.0, 100.0, FontFace::Bold, 12.0, Color::BLACK, "Relatório");

        let td = canvas
            .operations()
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        assert_eq!(td.operands[1].as_float().unwrap(), 700.0);

        let bytes = String::from_utf8_lossy(&canvas.encode().unwrap()).into_owned();
        assert!(bytes.contains("/F2"));
        assert!(bytes.contains("Tj"));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut canvas = PageCanvas::new(800.0);
        canvas.text(0.0, 0.0, FontFace::Regular, 9.0, Color::BLACK, "");
        assert!(canvas.is_empty());
    }
}
