//! Print the boxes decoded from a capture file, or from stdin.

use std::io::{self, Read};
use std::{env, fs};

use env_logger::Env;
use escp_decoder::{Decoder, LayoutBox};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let input = match env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        },
    };

    let mut decoder = Decoder::new();
    decoder.set_verbose_echo(true);

    let mut flowable = decoder.decode(&input);
    flowable.extend(decoder.flush());

    let lines = flowable.iter().filter(|b| b.is_line_feed()).count();
    let graphics = flowable
        .iter()
        .filter(|b| matches!(b, LayoutBox::Graphics(_)))
        .count();
    println!();
    println!("{} boxes, {lines} lines, {graphics} bit images", flowable.len());
    Ok(())
}
