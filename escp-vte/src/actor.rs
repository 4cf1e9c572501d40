//! Callbacks invoked by the ESC/P parser.
//!
//! The [`Parser`](crate::Parser) walks through a printer byte stream and
//! translates it into device level effects. Those effects are handed over to
//! an [`Actor`] implementation that is responsible for mutating the device
//! model, building layout boxes, logging, or whatever else the embedding
//! application needs. Implementations should be prepared to receive any
//! sequence of calls and should avoid performing additional parsing
//! themselves.

/// Horizontal density of `ESC K` single density bit images.
pub const BIT_IMAGE_DPI: u16 = 60;

const POINTS_PER_INCH: f64 = 72.0;

/// Line spacing selected by an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpacing {
    /// `ESC 2`, 1/6 inch.
    Sixth,
    /// `ESC 3 n`, n/216 inch.
    Fine(u8),
}

impl LineSpacing {
    /// Spacing expressed in points (1/72 inch).
    pub fn points(self) -> f64 {
        match self {
            Self::Sixth => POINTS_PER_INCH / 6.0,
            Self::Fine(n) => f64::from(n) * POINTS_PER_INCH / 216.0,
        }
    }
}

/// Consumer-facing interface for effects emitted by the parser.
///
/// The parser calls these methods synchronously, in the order the effects
/// occur within one byte. A single line feed byte, for instance, produces a
/// [`Actor::carriage_return`] followed by a [`Actor::line_feed`].
pub trait Actor {
    /// Emits a byte that is not part of any control function.
    fn print(&mut self, byte: u8);

    /// (CR) Return the horizontal position to the start of the line.
    fn carriage_return(&mut self);

    /// (LF) Advance one line using the current line spacing.
    fn line_feed(&mut self);

    /// (FF) Eject the current page.
    fn form_feed(&mut self);

    /// `ESC 2` / `ESC 3 n`.
    fn set_line_spacing(&mut self, spacing: LineSpacing);

    /// `ESC 4` / `ESC 5`.
    fn set_italic(&mut self, enabled: bool);

    /// `ESC E` / `ESC F`.
    fn set_bold(&mut self, enabled: bool);

    /// A complete `ESC K` bit image: one byte per 8-dot column.
    fn bit_image(&mut self, dpi: u16, data: Vec<u8>);

    /// An escape sequence the device does not understand.
    fn unexpected_escape(&mut self, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_inch_is_twelve_points() {
        assert_eq!(LineSpacing::Sixth.points(), 12.0);
    }

    #[test]
    fn fine_spacing_uses_216th_of_inch() {
        assert_eq!(LineSpacing::Fine(36).points(), 12.0);
        assert!((LineSpacing::Fine(10).points() - 3.333_333).abs() < 1e-4);
        assert_eq!(LineSpacing::Fine(0).points(), 0.0);
    }
}
