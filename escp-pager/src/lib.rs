//! Pagination of decoded ESC/P output.
//!
//! Flowables from [`escp_decoder::Decoder`] are packed onto pages of a
//! [`PageGeometry`] by the [`Paginator`]; a [`Document`] replays those pages
//! on any [`Renderer`] backend.

mod document;
mod error;
mod fonts;
mod geometry;
mod page;
mod paginator;
mod render;

pub use document::{Document, DocumentInfo, OverlayCallback, PageInfo};
pub use error::{PagerError, Result};
pub use fonts::{FontSet, FontVariant, STANDARD_FONTS};
pub use geometry::{PageGeometry, mm_to_pts};
pub use page::Page;
pub use paginator::{Paginator, extent};
pub use render::{Point, Renderer};
