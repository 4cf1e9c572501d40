use std::mem;

use log::{debug, trace};

use crate::actor::{Actor, BIT_IMAGE_DPI, LineSpacing};
use crate::enums::{Action, State};
use crate::transitions;

/// ESC/P byte stream parser.
///
/// The parser keeps its [`State`] between calls, so a stream may be split at
/// any byte boundary, including in the middle of an escape sequence or a bit
/// image, and fed through several [`Parser::advance`] calls.
#[derive(Default, Debug)]
pub struct Parser {
    state: State,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current machine state.
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) {
        for byte in bytes {
            self.advance_byte(*byte, actor);
        }
    }

    /// Process exactly one byte.
    pub fn advance_byte<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        let state = mem::take(&mut self.state);
        let (next_state, action) = transitions::transit(state, byte);
        self.state = next_state;
        self.perform(action, byte, actor);
    }

    fn perform<A: Actor>(&mut self, action: Action, byte: u8, actor: &mut A) {
        use Action::*;

        match action {
            Print => actor.print(byte),
            CarriageReturn => actor.carriage_return(),
            NewLine => {
                actor.carriage_return();
                actor.line_feed();
            },
            LineFeed => actor.line_feed(),
            FormFeed => actor.form_feed(),
            EscDispatch => self.esc_dispatch(actor, byte),
            FineLineSpacing => {
                actor.set_line_spacing(LineSpacing::Fine(byte))
            },
            BitImage(data) => {
                trace!("bit image: {} columns", data.len());
                actor.bit_image(BIT_IMAGE_DPI, data)
            },
            None => {},
        }
    }

    fn esc_dispatch<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        match byte {
            // Select 1/6 inch line spacing
            b'2' => actor.set_line_spacing(LineSpacing::Sixth),
            // Select italic font
            b'4' => actor.set_italic(true),
            // Cancel italic font
            b'5' => actor.set_italic(false),
            // Select bold font
            b'E' => actor.set_bold(true),
            // Cancel bold font
            b'F' => actor.set_bold(false),
            _ => {
                debug!("[unexpected: esc] byte: {:02X}", byte);
                actor.unexpected_escape(byte);
            },
        }
    }
}
