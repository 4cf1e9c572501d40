use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::charcode::CharCode;
use crate::error::{DecoderError, Result};
use crate::layout::TextStyle;

/// Default line spacing, 1/6 inch.
pub const DEFAULT_LINE_SPACING: f64 = 12.0;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Where a keyword triggered page break goes relative to the matching run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeywordPosition {
    #[default]
    Before,
    After,
}

impl FromStr for KeywordPosition {
    type Err = DecoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(DecoderError::InvalidKeywordPosition(s.to_owned())),
        }
    }
}

impl fmt::Display for KeywordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Before => "before",
            Self::After => "after",
        };
        f.write_str(s)
    }
}

/// Persistent printer state.
///
/// Escape sequences change spacing and style; everything else is set by the
/// caller. The state lives as long as the decoder that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    /// Line spacing in points applied to every following line feed.
    pub line_spacing: f64,
    pub font_size: f64,
    pub style: TextStyle,
    pub char_code: CharCode,
    /// Drop form feeds instead of turning them into page breaks.
    pub ignore_form_feed: bool,
    /// A completed line containing one of these gets a page break.
    pub page_break_keywords: Vec<String>,
    pub keyword_position: KeywordPosition,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            font_size: DEFAULT_FONT_SIZE,
            style: TextStyle::empty(),
            char_code: CharCode::default(),
            ignore_form_feed: false,
            page_break_keywords: Vec::new(),
            keyword_position: KeywordPosition::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeviceConfig {
    #[serde(default)]
    line_spacing: Option<f64>,
    #[serde(default)]
    font_size: Option<f64>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    char_code: Option<String>,
    #[serde(default)]
    ignore_form_feed: bool,
    #[serde(default)]
    page_break_keywords: Vec<String>,
    #[serde(default)]
    keyword_position: Option<String>,
}

impl DeviceState {
    /// Load a device configuration from JSON.
    ///
    /// Every field is optional, e.g.
    /// `{"char_code": "cp437", "page_break_keywords": ["Report"]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDeviceConfig = serde_json::from_str(json)?;
        let defaults = Self::default();

        let char_code = match raw.char_code {
            Some(label) => CharCode::from_label(&label)?,
            None => defaults.char_code,
        };
        let keyword_position = match raw.keyword_position {
            Some(position) => position.parse()?,
            None => defaults.keyword_position,
        };

        let mut style = TextStyle::empty();
        style.set(TextStyle::BOLD, raw.bold);
        style.set(TextStyle::ITALIC, raw.italic);

        Ok(Self {
            line_spacing: raw.line_spacing.unwrap_or(defaults.line_spacing),
            font_size: raw.font_size.unwrap_or(defaults.font_size),
            style,
            char_code,
            ignore_form_feed: raw.ignore_form_feed,
            page_break_keywords: raw.page_break_keywords,
            keyword_position,
        })
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
