//! Decoder for ESC/P dot-matrix printer streams.
//!
//! Bytes go through the [`vte`] state machine; its effects update the
//! [`DeviceState`] and build [`LayoutBox`]es, which are grouped into
//! [`Flowable`]s at every line feed.

mod charcode;
mod decoder;
mod device;
mod echo;
mod error;
mod layout;

pub use escp_vte as vte;

pub use charcode::CharCode;
pub use decoder::Decoder;
pub use device::{
    DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING, DeviceState, KeywordPosition,
};
pub use echo::{BoxObserver, WriterEcho};
pub use error::{DecoderError, Result};
pub use layout::{
    DEFAULT_GRAPHICS_H_DPI, DEFAULT_GRAPHICS_V_DPI, Flowable, GraphicsBox,
    LayoutBox, LineFeedBox, TextBox, TextStyle,
};
