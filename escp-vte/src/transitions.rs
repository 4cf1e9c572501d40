//! Transition helpers for the `escp-vte` finite state machine.
//!
//! Each function in this module is responsible for a specific parser state:
//! given an input byte it returns the next [`State`] and the [`Action`] the
//! parser should perform. Every function has a catch-all arm, so the table is
//! total over the byte alphabet and the machine can not get stuck.

use log::trace;

use crate::enums::{Action, GraphicsCapture, Progress, State};

const ESC: u8 = 0x1b;
const LF: u8 = 0x0a;
const FF: u8 = 0x0c;
const CR: u8 = 0x0d;

pub(crate) fn transit(state: State, byte: u8) -> (State, Action) {
    match state {
        State::Idle => ground(byte),
        State::CarriageReturnPending => carriage_return(byte),
        State::Escape => escape(byte),
        State::EscapeFineLineSpacing => (State::Idle, Action::FineLineSpacing),
        State::GraphicsCapture(capture) => graphics(capture, byte),
    }
}

/// Base decision shared by `Idle` and `CarriageReturnPending`.
#[inline(always)]
fn ground(byte: u8) -> (State, Action) {
    use Action::*;

    match byte {
        ESC => (State::Escape, None),
        LF => (State::Idle, NewLine),
        CR => (State::CarriageReturnPending, CarriageReturn),
        FF => (State::Idle, FormFeed),
        _ => (State::Idle, Print),
    }
}

/// A CR was just seen: CR LF collapses into one line terminator.
#[inline(always)]
fn carriage_return(byte: u8) -> (State, Action) {
    match byte {
        LF => (State::Idle, Action::LineFeed),
        _ => ground(byte),
    }
}

/// ESC state waiting for the byte that identifies the command.
#[inline(always)]
fn escape(byte: u8) -> (State, Action) {
    match byte {
        b'3' => (State::EscapeFineLineSpacing, Action::None),
        b'K' => (
            State::GraphicsCapture(GraphicsCapture::default()),
            Action::None,
        ),
        _ => (State::Idle, Action::EscDispatch),
    }
}

#[inline]
fn graphics(capture: GraphicsCapture, byte: u8) -> (State, Action) {
    match capture.advance(byte) {
        Progress::Pending(capture) => {
            (State::GraphicsCapture(capture), Action::None)
        },
        Progress::Empty => {
            trace!("empty bit image");
            (State::Idle, Action::None)
        },
        Progress::Complete(data) => (State::Idle, Action::BitImage(data)),
    }
}
