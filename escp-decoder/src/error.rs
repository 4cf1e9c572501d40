use thiserror::Error;

/// Configuration errors reported by the decoder.
///
/// Byte decoding itself never fails; these are raised synchronously by the
/// setter or loader that received the bad value.
#[derive(Debug, Error)]
pub enum DecoderError {
    #[error("unknown code page: {0}")]
    UnknownCodePage(String),

    #[error("code page {0} is not a single byte encoding")]
    MultiByteCodePage(String),

    #[error("invalid keyword page break position: {0}")]
    InvalidKeywordPosition(String),

    #[error("invalid device configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DecoderError>;
