//! Render driver.
//!
//! [`Document`] collects flowables, paginates them and replays the pages on
//! a [`Renderer`]: text runs are drawn at the print head which then moves by
//! the measured width, line feeds move it down, carriage returns back to the
//! left margin, and bit images are drawn dot by dot.

use escp_decoder::{Flowable, GraphicsBox, LayoutBox, TextBox};
use log::{debug, warn};

use crate::error::Result;
use crate::fonts::{FontSet, FontVariant};
use crate::geometry::PageGeometry;
use crate::page::Page;
use crate::paginator::Paginator;
use crate::render::{Cursor, Point, Renderer};

/// Share of a dot cell covered by a printed graphics dot.
const MARKER_FILL: f64 = 0.95;

/// Metadata handed to the renderer before the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    pub producer: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "ESC/P printout".to_owned(),
            subject: "Decoded dot-matrix printer output".to_owned(),
            author: String::new(),
            creator: env!("CARGO_PKG_NAME").to_owned(),
            producer: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
                .to_owned(),
        }
    }
}

/// Passed to the page overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based number of the page being drawn.
    pub number: usize,
    /// Total number of pages.
    pub count: usize,
}

pub type OverlayCallback<R> =
    Box<dyn Fn(&mut R, &PageInfo) -> std::result::Result<(), <R as Renderer>::Error>>;

pub struct Document<R: Renderer> {
    paginator: Paginator,
    fonts: FontSet,
    info: DocumentInfo,
    overlay: Option<OverlayCallback<R>>,
}

impl<R: Renderer> Document<R> {
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self {
            paginator: Paginator::new(geometry),
            fonts: FontSet::default(),
            info: DocumentInfo::default(),
            overlay: None,
        })
    }

    #[inline]
    pub fn geometry(&self) -> &PageGeometry {
        self.paginator.geometry()
    }

    #[inline]
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    #[inline]
    pub fn info_mut(&mut self) -> &mut DocumentInfo {
        &mut self.info
    }

    #[inline]
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn register_font(&mut self, name: impl Into<String>) -> bool {
        self.fonts.register(name)
    }

    /// See [`FontSet::select`].
    pub fn select_font(&mut self, name: &str, variant: FontVariant) -> Result<()> {
        self.fonts.select(name, variant)
    }

    /// Draw something on every page before its content, e.g. a header or
    /// "page X of N".
    pub fn set_overlay<F>(&mut self, overlay: F)
    where
        F: Fn(&mut R, &PageInfo) -> std::result::Result<(), R::Error> + 'static,
    {
        self.overlay = Some(Box::new(overlay));
    }

    pub fn add_flowable(&mut self, flowable: Flowable) {
        self.paginator.add_flowable(flowable);
    }

    /// Paginate queued flowables and return the number of pages.
    pub fn page_count(&mut self) -> usize {
        self.paginator.page_count()
    }

    pub fn pages(&mut self) -> &[Page] {
        self.paginator.paginate();
        self.paginator.pages()
    }

    /// Paginate and draw every page, then finish the renderer.
    pub fn render(&mut self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        let count = self.paginator.page_count();
        renderer.set_info(&self.info)?;

        let mut driver = PageDriver {
            geometry: *self.paginator.geometry(),
            fonts: &self.fonts,
            overlay: self.overlay.as_ref(),
            cursor: Cursor::new(self.paginator.geometry()),
            number: 1,
            count,
        };

        driver.begin_page(renderer)?;
        for (idx, page) in self.paginator.pages().iter().enumerate() {
            if idx > 0 {
                driver.next_page(renderer)?;
            }
            for layout_box in page.boxes() {
                driver.draw(layout_box, renderer)?;
            }
        }

        renderer.show_page()?;
        debug!("rendered {} pages", driver.number);
        renderer.finish()
    }
}

/// Position and page bookkeeping of one render pass.
struct PageDriver<'a, R: Renderer> {
    geometry: PageGeometry,
    fonts: &'a FontSet,
    overlay: Option<&'a OverlayCallback<R>>,
    cursor: Cursor,
    number: usize,
    count: usize,
}

impl<R: Renderer> PageDriver<'_, R> {
    fn begin_page(&mut self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        self.cursor.reset();
        if let Some(overlay) = self.overlay {
            let info = PageInfo {
                number: self.number,
                count: self.count.max(self.number),
            };
            overlay(renderer, &info)?;
        }
        Ok(())
    }

    fn next_page(&mut self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        renderer.show_page()?;
        self.number += 1;
        self.begin_page(renderer)
    }

    fn draw(
        &mut self,
        layout_box: &LayoutBox,
        renderer: &mut R,
    ) -> std::result::Result<(), R::Error> {
        match layout_box {
            LayoutBox::Text(run) => self.draw_text(run, renderer),
            LayoutBox::LineFeed(lf) => {
                self.cursor.advance(0.0, lf.line_space * self.geometry.scaling);
                if self.cursor.position().y < 0.0 {
                    warn!("page {} overflows, inserting an extra page", self.number);
                    self.next_page(renderer)?;
                }
                Ok(())
            },
            LayoutBox::CarriageReturn => {
                self.cursor.carriage_return();
                Ok(())
            },
            LayoutBox::Graphics(graphics) => self.draw_graphics(graphics, renderer),
            // Consumed by pagination.
            LayoutBox::PageBreak => Ok(()),
        }
    }

    fn draw_text(
        &mut self,
        run: &TextBox,
        renderer: &mut R,
    ) -> std::result::Result<(), R::Error> {
        let font = self
            .fonts
            .variant(FontVariant::from_flags(run.is_bold(), run.is_italic()));
        let size = run.font_size * self.geometry.scaling;

        renderer.draw_text(self.cursor.position(), &run.text, font, size)?;
        let width = renderer.text_width(&run.text, font, size);
        self.cursor.advance(width, 0.0);
        Ok(())
    }

    /// Each column byte is drawn bottom bit first going up; every set bit
    /// is a short horizontal stroke.
    fn draw_graphics(
        &mut self,
        graphics: &GraphicsBox,
        renderer: &mut R,
    ) -> std::result::Result<(), R::Error> {
        if graphics.h_dpi == 0 || graphics.v_dpi == 0 {
            warn!(
                "skipping bit image with resolution {}x{} dpi",
                graphics.h_dpi, graphics.v_dpi
            );
            return Ok(());
        }

        let scaling = self.geometry.scaling;
        let x_step = 72.0 / f64::from(graphics.h_dpi) * scaling;
        let y_step = 72.0 / f64::from(graphics.v_dpi) * scaling;
        let half_width = MARKER_FILL * x_step / 2.0;
        let thickness = MARKER_FILL * y_step;

        for &column in &graphics.data {
            let Point { x, y } = self.cursor.position();
            for bit in 0..8u8 {
                if column & (1 << bit) == 0 {
                    continue;
                }
                let dot_y = y + f64::from(bit) * y_step;
                renderer.draw_line(
                    Point::new(x - half_width, dot_y),
                    Point::new(x + half_width, dot_y),
                    thickness,
                )?;
            }
            self.cursor.advance(x_step, 0.0);
        }
        Ok(())
    }
}
