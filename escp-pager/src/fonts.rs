use std::collections::BTreeSet;

use escp_decoder::TextStyle;

use crate::error::{PagerError, Result};

/// The 14 fonts every PDF reader provides.
pub const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Symbol",
    "ZapfDingbats",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    pub fn from_style(style: TextStyle) -> Self {
        Self::from_flags(
            style.contains(TextStyle::BOLD),
            style.contains(TextStyle::ITALIC),
        )
    }

    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Regular => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::BoldItalic => 3,
        }
    }
}

/// Font faces used for text runs, one per [`FontVariant`].
///
/// Only registered names can be selected. The set starts with
/// [`STANDARD_FONTS`]; backends that embed their own fonts register them
/// under the name they will recognise in [`Renderer`](crate::Renderer) calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSet {
    faces: [String; 4],
    registered: BTreeSet<String>,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            faces: [
                "Courier".to_owned(),
                "Courier-Bold".to_owned(),
                "Courier-Oblique".to_owned(),
                "Courier-BoldOblique".to_owned(),
            ],
            registered: STANDARD_FONTS.iter().map(|&f| f.to_owned()).collect(),
        }
    }
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` selectable. Returns false if it already was.
    pub fn register(&mut self, name: impl Into<String>) -> bool {
        self.registered.insert(name.into())
    }

    #[inline]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// Use `name` for `variant`. Unregistered names leave the current face
    /// in place.
    pub fn select(&mut self, name: &str, variant: FontVariant) -> Result<()> {
        if !self.is_registered(name) {
            return Err(PagerError::UnregisteredFont(name.to_owned()));
        }
        self.faces[variant.index()] = name.to_owned();
        Ok(())
    }

    #[inline]
    pub fn variant(&self, variant: FontVariant) -> &str {
        &self.faces[variant.index()]
    }

    /// Face for a text run with `style`.
    #[inline]
    pub fn face(&self, style: TextStyle) -> &str {
        self.variant(FontVariant::from_style(style))
    }
}
