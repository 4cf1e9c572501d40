use std::fmt;

use encoding_rs::Encoding;

use crate::error::{DecoderError, Result};

/// Upper half (0x80..=0xFF) of IBM code page 437.
#[rustfmt::skip]
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

const CP437_LABELS: [&str; 4] = ["ibm437", "cp437", "437", "ibm-437"];

/// Byte to text table used for printable bytes.
///
/// Code page 437 is the power-on default of most dot-matrix printers and is
/// built in. Every other single byte encoding known to `encoding_rs` can be
/// selected by its WHATWG label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharCode {
    #[default]
    Ibm437,
    Encoding(&'static Encoding),
}

impl CharCode {
    /// Resolve a code page label such as `"cp437"` or `"windows-1252"`.
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        if CP437_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
            return Ok(Self::Ibm437);
        }

        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| DecoderError::UnknownCodePage(label.to_owned()))?;
        if !encoding.is_single_byte() {
            return Err(DecoderError::MultiByteCodePage(
                encoding.name().to_owned(),
            ));
        }

        Ok(Self::Encoding(encoding))
    }

    /// Decode one byte. Bytes the table does not map become U+FFFD.
    pub fn decode(self, byte: u8) -> char {
        match self {
            Self::Ibm437 => match byte {
                0x00..=0x7f => char::from(byte),
                _ => CP437_HIGH[usize::from(byte - 0x80)],
            },
            Self::Encoding(encoding) => {
                let bytes = [byte];
                let (text, _) = encoding.decode_without_bom_handling(&bytes);
                text.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ibm437 => "IBM437",
            Self::Encoding(encoding) => encoding.name(),
        }
    }
}

impl fmt::Display for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
