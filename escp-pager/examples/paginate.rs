//! Decode an ESC/P capture and print the laid out pages as text.
//!
//! ```text
//! cargo run -p escp-pager --example paginate -- capture.prn [device.json]
//! RUST_LOG=debug cargo run -p escp-pager --example paginate
//! ```

use std::convert::Infallible;
use std::error::Error;
use std::{env, fs};

use env_logger::Env;
use escp_decoder::{Decoder, DeviceState};
use escp_pager::{Document, DocumentInfo, PageGeometry, PageInfo, Point, Renderer};
use log::info;

const DEMO: &[u8] = b"\x1bEInvoice 1042\x1bF\r\n\
    \r\n\
    Qty  Item                 Price\r\n\
    \xc4\xc4\xc4  \xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4\xc4  \xc4\xc4\xc4\xc4\xc4\r\n\
    2    Ribbon, black        7.90\r\n\
    1    Paper, \x1b4continuous\x1b5  24.50\r\n\
    \x1b3\x12\x1bK\x08\x00\xff\x81\x81\x81\x81\x81\x81\xff\r\n\x1b2\
    \x1bETotal\x1bF                    32.40\r\n\
    \x0cInvoice 1043\r\n";

/// Prints every drawing call instead of producing a file.
struct TextRenderer {
    dots: usize,
}

impl Renderer for TextRenderer {
    type Error = Infallible;

    fn set_info(&mut self, info: &DocumentInfo) -> Result<(), Self::Error> {
        println!("== {} ({}) ==", info.title, info.producer);
        Ok(())
    }

    fn text_width(&self, text: &str, _font: &str, size: f64) -> f64 {
        // Courier advance is 600/1000 em.
        text.chars().count() as f64 * size * 0.6
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        font: &str,
        size: f64,
    ) -> Result<(), Self::Error> {
        println!(
            "  ({:>6.1}, {:>6.1}) {font} {size}: {text}",
            origin.x, origin.y
        );
        Ok(())
    }

    fn draw_line(&mut self, _: Point, _: Point, _: f64) -> Result<(), Self::Error> {
        self.dots += 1;
        Ok(())
    }

    fn show_page(&mut self) -> Result<(), Self::Error> {
        if self.dots > 0 {
            println!("  [{} graphics dots]", self.dots);
            self.dots = 0;
        }
        println!("-- page end --");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = env::args().skip(1);
    let input = match args.next() {
        Some(path) => fs::read(path)?,
        None => DEMO.to_vec(),
    };
    let device = match args.next() {
        Some(path) => DeviceState::from_json(&fs::read_to_string(path)?)?,
        None => DeviceState {
            page_break_keywords: vec!["Invoice".to_owned()],
            ..DeviceState::default()
        },
    };

    let mut decoder = Decoder::with_state(device);
    let mut doc = Document::new(PageGeometry::a4())?;
    doc.set_overlay(|renderer: &mut TextRenderer, page: &PageInfo| {
        renderer.draw_text(
            Point::new(500.0, 20.0),
            &format!("{}/{}", page.number, page.count),
            "Helvetica",
            8.0,
        )
    });

    doc.add_flowable(decoder.decode(&input));
    doc.add_flowable(decoder.flush());
    info!("decoded {} bytes into {} pages", input.len(), doc.page_count());

    let mut renderer = TextRenderer { dots: 0 };
    match doc.render(&mut renderer) {
        Ok(()) => Ok(()),
        Err(never) => match never {},
    }
}
