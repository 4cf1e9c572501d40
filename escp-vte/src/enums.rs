/// State of the ESC/P machine between two bytes.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    /// A CR was received; a following LF only advances the line.
    CarriageReturnPending,
    Escape,
    /// `ESC 3`, waiting for the spacing argument.
    EscapeFineLineSpacing,
    /// `ESC K`, collecting the length and column data.
    GraphicsCapture(GraphicsCapture),
}

impl State {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Progress of an `ESC K nL nH d1 ... dk` bit image.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GraphicsCapture {
    low: Option<u8>,
    high: Option<u8>,
    remaining: usize,
    data: Vec<u8>,
}

impl GraphicsCapture {
    /// Number of column bytes announced by `nL nH`, once both are known.
    pub fn expected_len(&self) -> Option<usize> {
        match (self.low, self.high) {
            (Some(low), Some(high)) => {
                Some(usize::from(low) + usize::from(high) * 256)
            },
            _ => None,
        }
    }

    /// Column bytes received so far.
    pub fn received(&self) -> usize {
        self.data.len()
    }

    /// Feed one byte. Yields the column data once the announced length has
    /// been collected.
    pub(crate) fn advance(mut self, byte: u8) -> Progress {
        match (self.low, self.high) {
            (None, _) => {
                self.low = Some(byte);
                Progress::Pending(self)
            },
            (Some(_), None) => {
                self.high = Some(byte);
                let expected = self.expected_len().unwrap_or_default();
                if expected == 0 {
                    return Progress::Empty;
                }
                self.remaining = expected;
                self.data.reserve_exact(expected);
                Progress::Pending(self)
            },
            (Some(_), Some(_)) => {
                self.data.push(byte);
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining == 0 {
                    Progress::Complete(self.data)
                } else {
                    Progress::Pending(self)
                }
            },
        }
    }
}

pub(crate) enum Progress {
    Pending(GraphicsCapture),
    /// `nL = nH = 0`.
    Empty,
    Complete(Vec<u8>),
}

/// What the parser has to perform for the byte that caused a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Print,
    CarriageReturn,
    /// CR followed by LF, both emitted for a single LF byte.
    NewLine,
    LineFeed,
    FormFeed,
    EscDispatch,
    FineLineSpacing,
    BitImage(Vec<u8>),
}
