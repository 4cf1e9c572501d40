//! ESC/P decoder and flowable assembler.
//!
//! [`Decoder::decode`] runs every byte through the [`escp_vte::Parser`],
//! which reports device effects to a [`Performer`]. The performer mutates
//! the [`DeviceState`] and appends boxes to the accumulator. After each byte
//! the assembler looks at the tail of the accumulator: a line feed completes
//! a line, which is checked for page break keywords and moved to the output
//! flowable.

use std::mem;

use escp_vte::{Actor as VteActor, LineSpacing, Parser as VtParser};
use log::{debug, info, trace};
use memchr::memmem;

use crate::charcode::CharCode;
use crate::device::{DeviceState, KeywordPosition};
use crate::echo::{BoxObserver, WriterEcho};
use crate::error::Result;
use crate::layout::{
    Flowable, GraphicsBox, LayoutBox, LineFeedBox, TextBox, TextStyle,
};

/// Stateful ESC/P decoder.
///
/// Device state, the parser state and the accumulator of the current,
/// incomplete line survive between [`Decoder::decode`] calls. Feeding a
/// stream in several chunks yields the same boxes as feeding it at once.
#[derive(Default)]
pub struct Decoder {
    vt: VtParser,
    device: DeviceState,
    /// Boxes of the line being decoded.
    boxes: Vec<LayoutBox>,
    /// Completed lines not yet handed out.
    flowable: Flowable,
    observer: Option<Box<dyn BoxObserver>>,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(device: DeviceState) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }

    /// Decode a chunk of bytes and return every line completed so far.
    ///
    /// Boxes of a line without a terminating line feed stay pending until a
    /// later call completes it, or until [`Decoder::flush`].
    pub fn decode(&mut self, bytes: &[u8]) -> Flowable {
        for &byte in bytes {
            let mut performer = Performer {
                device: &mut self.device,
                boxes: &mut self.boxes,
            };
            self.vt.advance_byte(byte, &mut performer);
            self.assemble();
        }

        mem::take(&mut self.flowable)
    }

    /// Hand out the pending incomplete line as well.
    ///
    /// Page break keywords are only matched on lines completed by a line
    /// feed; the flushed boxes go out unchecked.
    ///
    /// Parser state is kept: an unfinished escape sequence or bit image
    /// still completes with the next decoded bytes.
    pub fn flush(&mut self) -> Flowable {
        let pending = mem::take(&mut self.boxes);
        self.emit(pending);
        mem::take(&mut self.flowable)
    }

    /// Boxes of the current, incomplete line.
    pub fn pending(&self) -> &[LayoutBox] {
        &self.boxes
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    pub fn state(&self) -> &escp_vte::State {
        self.vt.state()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.vt.is_idle()
    }

    pub fn set_default_line_spacing(&mut self, points: f64) {
        self.device.line_spacing = points;
    }

    pub fn set_font_size(&mut self, points: f64) {
        self.device.font_size = points;
    }

    /// Select the code page by label, e.g. `"cp437"` or `"windows-1252"`.
    pub fn set_char_code(&mut self, label: &str) -> Result<()> {
        self.device.char_code = CharCode::from_label(label)?;
        Ok(())
    }

    pub fn set_ignore_form_feed(&mut self, ignore: bool) {
        self.device.ignore_form_feed = ignore;
    }

    pub fn set_page_break_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.device.page_break_keywords =
            keywords.into_iter().map(Into::into).collect();
    }

    pub fn set_keyword_position(&mut self, position: KeywordPosition) {
        self.device.keyword_position = position;
    }

    /// Same as [`Decoder::set_keyword_position`], from `"before"`/`"after"`.
    pub fn set_keyword_position_label(&mut self, label: &str) -> Result<()> {
        self.device.keyword_position = label.parse()?;
        Ok(())
    }

    /// Echo every completed box to stdout.
    pub fn set_verbose_echo(&mut self, enabled: bool) {
        self.observer = if enabled {
            Some(Box::new(WriterEcho::stdout()))
        } else {
            None
        };
    }

    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: BoxObserver + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn assemble(&mut self) {
        match self.boxes.last() {
            Some(LayoutBox::LineFeed(_)) => {
                self.insert_keyword_break();
                let line = mem::take(&mut self.boxes);
                self.emit(line);
            },
            Some(LayoutBox::PageBreak) if self.device.ignore_form_feed => {
                trace!("ignoring form feed");
                self.boxes.pop();
            },
            _ => {},
        }
    }

    /// Insert at most one page break for the first text run containing a
    /// keyword. Runs are checked in order, keywords in configured order.
    fn insert_keyword_break(&mut self) {
        let keywords = &self.device.page_break_keywords;
        if keywords.is_empty() {
            return;
        }

        let found = self.boxes.iter().enumerate().find_map(|(idx, b)| {
            let LayoutBox::Text(run) = b else {
                return None;
            };
            keywords
                .iter()
                .find(|kw| contains(&run.text, kw))
                .map(|kw| (idx, kw))
        });

        if let Some((idx, keyword)) = found {
            debug!("page break keyword {keyword:?} matched");
            let at = match self.device.keyword_position {
                KeywordPosition::Before => idx,
                KeywordPosition::After => idx + 1,
            };
            self.boxes.insert(at, LayoutBox::PageBreak);
        }
    }

    fn emit(&mut self, boxes: Vec<LayoutBox>) {
        if let Some(observer) = self.observer.as_mut() {
            for layout_box in &boxes {
                observer.on_box(layout_box);
            }
        }
        self.flowable.extend(boxes);
    }
}

#[inline]
fn contains(text: &str, keyword: &str) -> bool {
    memmem::find(text.as_bytes(), keyword.as_bytes()).is_some()
}

/// Applies parser effects to the device state and the accumulator.
struct Performer<'a> {
    device: &'a mut DeviceState,
    boxes: &'a mut Vec<LayoutBox>,
}

impl VteActor for Performer<'_> {
    /// Append to the last box if it is a text run in the current style,
    /// start a new run otherwise.
    fn print(&mut self, byte: u8) {
        let DeviceState {
            char_code,
            font_size,
            style,
            ..
        } = *self.device;
        let c = char_code.decode(byte);

        if let Some(LayoutBox::Text(run)) = self.boxes.last_mut() {
            if run.accepts(char_code, font_size, style) {
                run.text.push(c);
                return;
            }
        }

        let mut run = TextBox::new(char_code, font_size, style);
        run.text.push(c);
        self.boxes.push(LayoutBox::Text(run));
    }

    fn carriage_return(&mut self) {
        self.boxes.push(LayoutBox::CarriageReturn);
    }

    fn line_feed(&mut self) {
        self.boxes.push(LayoutBox::LineFeed(LineFeedBox {
            line_space: self.device.line_spacing,
        }));
    }

    fn form_feed(&mut self) {
        self.boxes.push(LayoutBox::PageBreak);
    }

    fn set_line_spacing(&mut self, spacing: LineSpacing) {
        self.device.line_spacing = spacing.points();
    }

    fn set_italic(&mut self, enabled: bool) {
        self.device.style.set(TextStyle::ITALIC, enabled);
    }

    fn set_bold(&mut self, enabled: bool) {
        self.device.style.set(TextStyle::BOLD, enabled);
    }

    fn bit_image(&mut self, dpi: u16, data: Vec<u8>) {
        self.boxes.push(LayoutBox::Graphics(GraphicsBox::new(data, dpi)));
    }

    fn unexpected_escape(&mut self, byte: u8) {
        info!(
            "received unknown ESC sequence: ESC {}",
            self.device.char_code.decode(byte)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::DecoderError;

    fn text(s: &str) -> LayoutBox {
        LayoutBox::Text(TextBox {
            text: s.to_owned(),
            char_code: CharCode::Ibm437,
            font_size: 12.0,
            style: TextStyle::empty(),
        })
    }

    fn styled(s: &str, style: TextStyle) -> LayoutBox {
        LayoutBox::Text(TextBox {
            text: s.to_owned(),
            char_code: CharCode::Ibm437,
            font_size: 12.0,
            style,
        })
    }

    fn lf(line_space: f64) -> LayoutBox {
        LayoutBox::LineFeed(LineFeedBox { line_space })
    }

    const CR: LayoutBox = LayoutBox::CarriageReturn;
    const PB: LayoutBox = LayoutBox::PageBreak;

    #[test]
    fn line_terminators() {
        // CR LF: the CR byte emits the carriage return, LF only advances.
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(b"A\r\n"), vec![text("A"), CR, lf(12.0)]);

        // A bare LF emits its own carriage return.
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(b"A\n"), vec![text("A"), CR, lf(12.0)]);

        // Only the CR directly before LF is absorbed.
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(b"A\r\r\n"),
            vec![text("A"), CR, CR, lf(12.0)]
        );

        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(b"A\rB\n"),
            vec![text("A"), CR, text("B"), CR, lf(12.0)]
        );
    }

    #[test]
    fn incomplete_line_stays_pending() {
        let mut decoder = Decoder::new();
        assert!(decoder.decode(b"Hello").is_empty());
        assert_eq!(decoder.pending(), &[text("Hello")]);

        assert_eq!(
            decoder.decode(b", world\n"),
            vec![text("Hello, world"), CR, lf(12.0)]
        );
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn flush_hands_out_pending_boxes() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(b"one\ntwo"), vec![text("one"), CR, lf(12.0)]);
        assert_eq!(decoder.flush(), vec![text("two")]);
        assert!(decoder.flush().is_empty());
    }

    #[test]
    fn style_change_starts_new_run() {
        let mut decoder = Decoder::new();
        let flowable = decoder.decode(b"a\x1bEb\x1b4c\x1bF\x1b5d\x1bEe\n");
        assert_eq!(
            flowable,
            vec![
                text("a"),
                styled("b", TextStyle::BOLD),
                styled("c", TextStyle::BOLD | TextStyle::ITALIC),
                text("d"),
                styled("e", TextStyle::BOLD),
                CR,
                lf(12.0),
            ]
        );
    }

    #[test]
    fn redundant_style_escape_keeps_run() {
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(b"ab\x1bF\x1b5cd\n"),
            vec![text("abcd"), CR, lf(12.0)]
        );
    }

    #[test]
    fn font_size_change_starts_new_run() {
        let mut decoder = Decoder::new();
        decoder.decode(b"a");
        decoder.set_font_size(10.0);
        let flowable = decoder.decode(b"b\n");
        let LayoutBox::Text(run) = &flowable[1] else {
            panic!("expected text run, got {:?}", flowable[1]);
        };
        assert_eq!(run.text, "b");
        assert_eq!(run.font_size, 10.0);
    }

    #[test]
    fn line_spacing_escapes_apply_to_following_line_feeds() {
        let mut decoder = Decoder::new();
        decoder.decode(b"\x1b3\x0a");
        assert!((decoder.device().line_spacing - 10.0 / 216.0 * 72.0).abs() < 1e-5);

        let flowable = decoder.decode(b"x\n\x1b2y\n");
        let spaces: Vec<f64> =
            flowable.iter().filter_map(LayoutBox::line_space).collect();
        assert_eq!(spaces.len(), 2);
        assert!((spaces[0] - 3.333_333).abs() < 1e-4);
        assert_eq!(spaces[1], 12.0);
    }

    #[test]
    fn default_line_spacing_setter() {
        let mut decoder = Decoder::new();
        decoder.set_default_line_spacing(8.0);
        assert_eq!(decoder.decode(b"\n"), vec![CR, lf(8.0)]);
    }

    #[test]
    fn form_feed_becomes_page_break() {
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(b"a\x0cb\n"),
            vec![text("a"), PB, text("b"), CR, lf(12.0)]
        );
    }

    #[test]
    fn ignored_form_feed_is_dropped() {
        let mut decoder = Decoder::new();
        decoder.set_ignore_form_feed(true);
        assert_eq!(
            decoder.decode(b"a\x0c\x0cb\n"),
            vec![text("ab"), CR, lf(12.0)]
        );

        // A style change still splits the run around the dropped form feed.
        assert_eq!(
            decoder.decode(b"c\x0c\x1bEd\x0c\x1bFe\n"),
            vec![
                text("c"),
                styled("d", TextStyle::BOLD),
                text("e"),
                CR,
                lf(12.0),
            ]
        );
    }

    #[test]
    fn flush_skips_keyword_matching() {
        let mut decoder = Decoder::new();
        decoder.set_page_break_keywords(["Total"]);
        assert!(decoder.decode(b"Total").is_empty());
        assert_eq!(decoder.flush(), vec![text("Total")]);
    }

    #[test]
    fn windows_code_page_decodes_through_decoder() {
        let mut decoder = Decoder::new();
        decoder.set_char_code("windows-1252").unwrap();
        let flowable = decoder.decode(b"\x80 \xe9\n");
        let LayoutBox::Text(run) = &flowable[0] else {
            panic!("expected text run, got {:?}", flowable[0]);
        };
        assert_eq!(run.text, "€ é");
    }

    #[test]
    fn bit_image_box() {
        let mut decoder = Decoder::new();
        let flowable = decoder.decode(b"\x1bK\x02\x00\xff\x0a\n");
        assert_eq!(
            flowable,
            vec![
                LayoutBox::Graphics(GraphicsBox {
                    data: vec![0xff, 0x0a],
                    h_dpi: 60,
                    v_dpi: 72,
                }),
                CR,
                lf(12.0),
            ]
        );
    }

    #[test]
    fn keyword_before() {
        let mut decoder = Decoder::new();
        decoder.set_page_break_keywords(["Report"]);
        assert_eq!(
            decoder.decode(b"x\x1bEMonthly Report\n"),
            vec![
                text("x"),
                PB,
                styled("Monthly Report", TextStyle::BOLD),
                CR,
                lf(12.0),
            ]
        );
    }

    #[test]
    fn keyword_after() {
        let mut decoder = Decoder::new();
        decoder.set_page_break_keywords(["Report"]);
        decoder.set_keyword_position(KeywordPosition::After);
        assert_eq!(
            decoder.decode(b"Report\n"),
            vec![text("Report"), PB, CR, lf(12.0)]
        );
    }

    #[test]
    fn only_first_keyword_match_breaks() {
        let mut decoder = Decoder::new();
        decoder.set_page_break_keywords(["B", "A"]);
        let flowable = decoder.decode(b"A\x1bEB\n");
        assert_eq!(
            flowable,
            vec![PB, text("A"), styled("B", TextStyle::BOLD), CR, lf(12.0)]
        );
        assert_eq!(flowable.iter().filter(|b| b.is_page_break()).count(), 1);
    }

    #[test]
    fn keyword_checked_once_per_line() {
        let mut decoder = Decoder::new();
        decoder.set_page_break_keywords(["Total"]);
        let flowable = decoder.decode(b"Grand Total\nnothing\nTotal\n");
        assert_eq!(
            flowable,
            vec![
                PB,
                text("Grand Total"),
                CR,
                lf(12.0),
                text("nothing"),
                CR,
                lf(12.0),
                PB,
                text("Total"),
                CR,
                lf(12.0),
            ]
        );
    }

    #[test]
    fn keyword_position_label() {
        let mut decoder = Decoder::new();
        decoder.set_keyword_position_label("after").unwrap();
        assert_eq!(decoder.device().keyword_position, KeywordPosition::After);
        assert!(matches!(
            decoder.set_keyword_position_label("sideways"),
            Err(DecoderError::InvalidKeywordPosition(_))
        ));
        assert_eq!(decoder.device().keyword_position, KeywordPosition::After);
    }

    #[test]
    fn char_code_switch_starts_new_run() {
        let mut decoder = Decoder::new();
        decoder.decode(b"\xc4");
        decoder.set_char_code("windows-1252").unwrap();
        let flowable = decoder.decode(b"\x80\n");
        assert_eq!(flowable.len(), 4);
        let (LayoutBox::Text(a), LayoutBox::Text(b)) = (&flowable[0], &flowable[1])
        else {
            panic!("expected two text runs: {flowable:?}");
        };
        assert_eq!(a.text, "─");
        assert_eq!(b.text, "€");

        assert!(decoder.set_char_code("utf-16le").is_err());
        assert_eq!(decoder.device().char_code.name(), "windows-1252");
    }

    #[test]
    fn unknown_escape_is_ignored() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(b"\x1b@ok\n"), vec![text("ok"), CR, lf(12.0)]);
        assert!(decoder.is_idle());
    }

    #[test]
    fn chunking_is_transparent() {
        let stream: &[u8] =
            b"Head\x1bE line\x1bF\r\nbody\x1b3\x18 x\x1bK\x03\x00\x01\x0a\x0d\x0c\
              tail\x1b4it\x1b5\r\rmore\n\x1bK\x00\x00end";
        let configure = |decoder: &mut Decoder| {
            decoder.set_page_break_keywords(["body", "more"]);
        };

        let mut whole = Decoder::new();
        configure(&mut whole);
        let mut expected = whole.decode(stream);
        expected.extend(whole.flush());

        for split in 0..=stream.len() {
            let mut decoder = Decoder::new();
            configure(&mut decoder);
            let mut actual = decoder.decode(&stream[..split]);
            actual.extend(decoder.decode(&stream[split..]));
            actual.extend(decoder.flush());
            assert_eq!(actual, expected, "split at {split}");
        }

        let mut decoder = Decoder::new();
        configure(&mut decoder);
        let mut actual = Vec::new();
        for byte in stream {
            actual.extend(decoder.decode(std::slice::from_ref(byte)));
        }
        actual.extend(decoder.flush());
        assert_eq!(actual, expected);
    }

    #[test]
    fn observer_sees_completed_boxes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut decoder = Decoder::new();
        decoder.set_observer(move |b: &LayoutBox| sink.borrow_mut().push(b.to_string()));
        decoder.decode(b"Hi\r\nthere");

        assert_eq!(*seen.borrow(), vec!["Hi", "{CR}", "{LF 12 pts}\n"]);
    }

    #[test]
    fn observer_does_not_change_output() {
        let stream = b"a\x1bEb\nc\x0c\n";
        let mut plain = Decoder::new();
        let mut echoed = Decoder::new();
        echoed.set_observer(|_: &LayoutBox| {});
        assert_eq!(plain.decode(stream), echoed.decode(stream));
    }

    #[test]
    fn with_state_uses_given_device() {
        let device = DeviceState {
            line_spacing: 6.0,
            style: TextStyle::ITALIC,
            ..DeviceState::default()
        };
        let mut decoder = Decoder::with_state(device);
        assert_eq!(
            decoder.decode(b"i\n"),
            vec![styled("i", TextStyle::ITALIC), CR, lf(6.0)]
        );
    }
}
