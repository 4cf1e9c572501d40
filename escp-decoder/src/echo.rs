//! Per-box diagnostic echo.
//!
//! The decoder notifies an optional [`BoxObserver`] every time a box leaves
//! the accumulator. Observers only see boxes; they can not change decoding
//! results.

use std::io::{self, Write};

use log::warn;

use crate::layout::LayoutBox;

pub trait BoxObserver {
    fn on_box(&mut self, layout_box: &LayoutBox);
}

impl<F> BoxObserver for F
where
    F: FnMut(&LayoutBox),
{
    fn on_box(&mut self, layout_box: &LayoutBox) {
        self(layout_box)
    }
}

/// Writes the [`Display`](std::fmt::Display) form of every box to `W`.
pub struct WriterEcho<W: Write> {
    writer: W,
}

impl<W: Write> WriterEcho<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterEcho<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BoxObserver for WriterEcho<W> {
    fn on_box(&mut self, layout_box: &LayoutBox) {
        if let Err(err) = write!(self.writer, "{layout_box}") {
            warn!("failed to echo decoded box: {err}");
        }
    }
}
