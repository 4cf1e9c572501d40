//! Rendering backend seam.
//!
//! The pager knows nothing about font metrics or output formats. A
//! [`Renderer`] measures and draws; [`Document`](crate::Document) decides
//! what goes where.

use log::{error, warn};

use crate::document::DocumentInfo;
use crate::geometry::PageGeometry;

/// A position in points, origin at the bottom left of the page.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Output backend driven page by page.
///
/// Drawing calls always target the current page; [`Renderer::show_page`]
/// closes it and opens the next one.
pub trait Renderer {
    type Error;

    fn set_info(&mut self, info: &DocumentInfo) -> Result<(), Self::Error>;

    /// Advance width of `text` set in `font` at `size` points.
    fn text_width(&self, text: &str, font: &str, size: f64) -> f64;

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        font: &str,
        size: f64,
    ) -> Result<(), Self::Error>;

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
    ) -> Result<(), Self::Error>;

    fn show_page(&mut self) -> Result<(), Self::Error>;

    fn finish(&mut self) -> Result<(), Self::Error>;
}

/// Print head position while rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cursor {
    origin: Point,
    position: Point,
    /// Right margin mirrored from the left one.
    soft_limit: f64,
    /// Page width.
    hard_limit: f64,
}

impl Cursor {
    pub(crate) fn new(geometry: &PageGeometry) -> Self {
        let origin = Point::new(geometry.x_start(), geometry.y_start());
        Self {
            origin,
            position: origin,
            soft_limit: geometry.width - origin.x,
            hard_limit: geometry.width,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> Point {
        self.position
    }

    /// Back to the top left of the printable area.
    pub(crate) fn reset(&mut self) {
        self.position = self.origin;
    }

    pub(crate) fn carriage_return(&mut self) {
        self.position.x = self.origin.x;
    }

    /// Move right by `dx` and down by `dy`.
    pub(crate) fn advance(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y -= dy;
        self.check_limits();
    }

    fn check_limits(&self) {
        let x = self.position.x;
        if x > self.hard_limit {
            error!("printing beyond page width at x = {x} pts");
        } else if x > self.soft_limit {
            warn!("printing close to the right border at x = {x} pts");
        }
    }
}
