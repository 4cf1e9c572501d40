mod actor;
mod enums;
mod parser;
mod transitions;

pub use actor::{Actor, LineSpacing, BIT_IMAGE_DPI};
pub use enums::{GraphicsCapture, State};
pub use parser::Parser;
