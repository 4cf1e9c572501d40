use escp_vte::{Actor, LineSpacing, Parser};

#[derive(Default)]
struct MyActor;

impl Actor for MyActor {
    fn print(&mut self, byte: u8) {
        println!("print: {byte:#04x}");
    }

    fn carriage_return(&mut self) {
        println!("CR");
    }

    fn line_feed(&mut self) {
        println!("LF");
    }

    fn form_feed(&mut self) {
        println!("FF");
    }

    fn set_line_spacing(&mut self, spacing: LineSpacing) {
        println!("line spacing: {:.2} pt", spacing.points());
    }

    fn set_italic(&mut self, enabled: bool) {
        println!("italic: {enabled}");
    }

    fn set_bold(&mut self, enabled: bool) {
        println!("bold: {enabled}");
    }

    fn bit_image(&mut self, dpi: u16, data: Vec<u8>) {
        println!("bit image: {} columns at {dpi} dpi", data.len());
    }

    fn unexpected_escape(&mut self, byte: u8) {
        println!("unknown: ESC {byte:#04x}");
    }
}

fn main() {
    let mut parser = Parser::new();
    let mut actor = MyActor::default();
    parser.advance(b"\x1bEhi\x1bF\r\n\x1bK\x02\x00\x7f\x41\x1b@", &mut actor);
}
