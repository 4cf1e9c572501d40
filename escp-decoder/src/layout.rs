//! Layout boxes produced by the decoder.
//!
//! A [`LayoutBox`] is one typed unit of decoded content. Boxes are created
//! by the decoder, moved into a [`Flowable`] once their line is complete and
//! from there onto pages; they are never shared between collections.

use std::fmt;

use bitflags::bitflags;

use crate::charcode::CharCode;

/// Default horizontal graphics resolution.
pub const DEFAULT_GRAPHICS_H_DPI: u16 = 60;

/// Default vertical graphics resolution (one 8-dot column per 1/9 inch).
pub const DEFAULT_GRAPHICS_V_DPI: u16 = 72;

bitflags! {
    /// Font style flags stamped on every text run.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextStyle: u8 {
        const BOLD   = 1;
        const ITALIC = 1 << 1;
    }
}

/// Ordered sequence of boxes handed from the decoder to the paginator.
pub type Flowable = Vec<LayoutBox>;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBox {
    Text(TextBox),
    Graphics(GraphicsBox),
    LineFeed(LineFeedBox),
    CarriageReturn,
    PageBreak,
}

impl LayoutBox {
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[inline]
    pub fn is_line_feed(&self) -> bool {
        matches!(self, Self::LineFeed(_))
    }

    #[inline]
    pub fn is_page_break(&self) -> bool {
        matches!(self, Self::PageBreak)
    }

    /// Vertical advance contributed by this box.
    #[inline]
    pub fn line_space(&self) -> Option<f64> {
        match self {
            Self::LineFeed(lf) => Some(lf.line_space),
            _ => None,
        }
    }
}

/// Diagnostic form of a box, as printed by the echo observer.
impl fmt::Display for LayoutBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(&text.text),
            Self::Graphics(graphics) => {
                write!(f, "{{Graphics Data {} bytes}}", graphics.data.len())
            },
            Self::LineFeed(lf) => writeln!(f, "{{LF {} pts}}", lf.line_space),
            Self::CarriageReturn => f.write_str("{CR}"),
            Self::PageBreak => writeln!(f, "{{Page Break}}"),
        }
    }
}

/// A maximal run of decoded text sharing one set of style attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    pub char_code: CharCode,
    pub font_size: f64,
    pub style: TextStyle,
}

impl TextBox {
    pub fn new(char_code: CharCode, font_size: f64, style: TextStyle) -> Self {
        Self {
            text: String::new(),
            char_code,
            font_size,
            style,
        }
    }

    /// Whether text in the given style may be appended to this run.
    #[inline]
    pub fn accepts(
        &self,
        char_code: CharCode,
        font_size: f64,
        style: TextStyle,
    ) -> bool {
        self.char_code == char_code
            && self.font_size == font_size
            && self.style == style
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.style.contains(TextStyle::BOLD)
    }

    #[inline]
    pub fn is_italic(&self) -> bool {
        self.style.contains(TextStyle::ITALIC)
    }
}

/// Raw column data of one bit image command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsBox {
    pub data: Vec<u8>,
    pub h_dpi: u16,
    pub v_dpi: u16,
}

impl GraphicsBox {
    pub fn new(data: Vec<u8>, h_dpi: u16) -> Self {
        Self {
            data,
            h_dpi,
            v_dpi: DEFAULT_GRAPHICS_V_DPI,
        }
    }
}

/// A vertical advance of `line_space` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFeedBox {
    pub line_space: f64,
}
