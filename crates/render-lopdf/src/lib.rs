//! PDF drawing for phishing reports using lopdf.
//!
//! Sections are drawn into per-page operation buffers ([`PageSet`]); once
//! every section is placed, [`write_document`] turns the buffers into a
//! lopdf `Document` whose pages share one resource dictionary.

mod canvas;
mod renderer;
mod writer;

pub use canvas::{PageCanvas, PageSet};
pub use renderer::{HeaderSpec, render_cards, render_header, render_section};
pub use writer::{DocumentInfo, LOGO_RESOURCE, save_document, write_document};
