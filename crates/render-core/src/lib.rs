//! Core rendering abstractions for phishing report PDFs.
//!
//! This crate holds everything about a report page that does not depend on
//! the PDF backend:
//! - `PageGeometry` and `DocumentCursor` for tracking the write position
//! - Pagination planning for tables (`plan_table`) and card grids (`plan_cards`)
//! - Helvetica advance widths, truncation and WinAnsi encoding
//! - Section, column and card descriptions handed to the renderer
//! - Number and date formatting used in every table

mod cursor;
mod error;
pub mod format;
pub mod metrics;
mod pagination;
mod section;
pub mod utils;

pub use cursor::{DocumentCursor, PageGeometry};
pub use error::RenderError;
pub use metrics::{FontFace, text_width, truncate_to_width};
pub use pagination::{CardPlacement, SectionStyle, TableChunk, plan_cards, plan_table};
pub use section::{Align, CardSpec, ColumnSpec, SectionSpec, status_color};
