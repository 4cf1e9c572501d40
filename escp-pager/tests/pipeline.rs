use escp_decoder::{Decoder, LayoutBox};
use escp_pager::{
    Document, DocumentInfo, Page, PageGeometry, PageInfo, Paginator, Point, Renderer,
};

/// Counts drawing calls per page.
#[derive(Default)]
struct PageRecorder {
    pages: Vec<Vec<String>>,
    current: Vec<String>,
    dots: usize,
    finished: bool,
}

impl Renderer for PageRecorder {
    type Error = std::convert::Infallible;

    fn set_info(&mut self, _: &DocumentInfo) -> Result<(), Self::Error> {
        Ok(())
    }

    fn text_width(&self, text: &str, _: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.6
    }

    fn draw_text(&mut self, _: Point, text: &str, _: &str, _: f64) -> Result<(), Self::Error> {
        self.current.push(text.to_owned());
        Ok(())
    }

    fn draw_line(&mut self, _: Point, _: Point, _: f64) -> Result<(), Self::Error> {
        self.dots += 1;
        Ok(())
    }

    fn show_page(&mut self) -> Result<(), Self::Error> {
        self.pages.push(std::mem::take(&mut self.current));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.finished = true;
        Ok(())
    }
}

fn report(lines: usize) -> Vec<u8> {
    let mut stream = b"\x1bEQuarterly Report\x1bF\r\n".to_vec();
    for i in 0..lines {
        stream.extend_from_slice(format!("item {i}\r\n").as_bytes());
    }
    stream
}

#[test]
fn decoded_stream_is_paginated_and_rendered() {
    let mut stream = report(3);
    stream.extend_from_slice(b"\x0cSummary\r\n\x1bK\x02\x00\x03\x80\r\n");
    stream.extend_from_slice(&report(1));

    let mut decoder = Decoder::new();
    decoder.set_page_break_keywords(["Report"]);

    let mut doc = Document::new(PageGeometry::a4()).unwrap();
    // Fed in uneven chunks, as it would come off a serial line.
    for chunk in stream.chunks(7) {
        let flowable = decoder.decode(chunk);
        if !flowable.is_empty() {
            doc.add_flowable(flowable);
        }
    }
    doc.add_flowable(decoder.flush());
    doc.set_overlay(|renderer: &mut PageRecorder, page: &PageInfo| {
        renderer.draw_text(
            Point::new(0.0, 0.0),
            &format!("page {} of {}", page.number, page.count),
            "Helvetica",
            8.0,
        )
    });

    assert_eq!(doc.page_count(), 3);

    let mut recorder = PageRecorder::default();
    doc.render(&mut recorder).unwrap();

    assert!(recorder.finished);
    assert_eq!(
        recorder.pages,
        vec![
            vec!["page 1 of 3", "Quarterly Report", "item 0", "item 1", "item 2"],
            vec!["page 2 of 3", "Summary"],
            vec!["page 3 of 3", "Quarterly Report", "item 0"],
        ]
    );
    assert_eq!(recorder.dots, 3);
}

#[test]
fn long_listing_spills_over_a4_pages() {
    let mut decoder = Decoder::new();
    let mut paginator = Paginator::new(PageGeometry::a4());

    // 743 pts of vertical space fit 61 lines of 12 pts plus one more.
    paginator.add_flowable(decoder.decode(&report(129)));
    let pages = paginator.into_pages();

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].boxes().iter().filter(|b| b.is_text()).count(), 62);
    assert_eq!(pages[1].boxes().iter().filter(|b| b.is_text()).count(), 62);
    assert_eq!(pages[2].boxes().iter().filter(|b| b.is_text()).count(), 6);
    for page in &pages[..2] {
        assert_eq!(page.extent(), 744.0);
        assert!(page.boxes().last().is_some_and(LayoutBox::is_line_feed));
    }
}

#[test]
fn fine_line_spacing_packs_more_lines() {
    let mut decoder = Decoder::new();
    let mut paginator = Paginator::new(PageGeometry::a4());

    // 1/8 inch line spacing: 9 pts per line.
    let mut stream = b"\x1b3\x1b".to_vec();
    stream.extend_from_slice(&report(100));
    paginator.add_flowable(decoder.decode(&stream));

    assert_eq!(paginator.page_count(), 2);
    let first = &paginator.pages()[0];
    assert_eq!(first.boxes().iter().filter(|b| b.is_text()).count(), 83);
}

#[test]
fn fine_spacing_extent_does_not_drift() {
    let mut decoder = Decoder::new();
    let geometry = PageGeometry {
        width: 600.0,
        height: 1200.0,
        left_margin: 0.0,
        top_margin: 0.0,
        bottom_margin: 0.0,
        scaling: 1.0,
    };
    let mut paginator = Paginator::new(geometry);

    // 1/216 inch line spacing: one third of a point per line.
    let mut stream = b"\x1b3\x01".to_vec();
    for _ in 0..3000 {
        stream.extend_from_slice(b"x\n");
    }
    paginator.add_flowable(decoder.decode(&stream));

    let pages = paginator.into_pages();
    assert_eq!(pages.len(), 1);
    assert!((pages[0].extent() - 1000.0).abs() < 1e-9);

    let boxes = pages.into_iter().next().map(Page::into_boxes).unwrap_or_default();
    assert_eq!(boxes.len(), 3 * 3000);
    assert!(boxes.iter().filter_map(LayoutBox::line_space).all(|s| (s - 1.0 / 3.0).abs() < 1e-12));
}
