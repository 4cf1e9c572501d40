//! Pagination engine.
//!
//! Flowables are queued with [`Paginator::add_flowable`] and packed onto
//! pages by [`Paginator::paginate`]. Each queued flowable is placed exactly
//! once; paginating again without new input changes nothing.

use std::collections::VecDeque;

use escp_decoder::{Flowable, LayoutBox};
use log::{debug, warn};

use crate::geometry::PageGeometry;
use crate::page::Page;

/// Vertical extent of `boxes` up to the first page break, scaled.
pub fn extent(boxes: &[LayoutBox], scaling: f64) -> f64 {
    let sum: f64 = boxes
        .iter()
        .take_while(|b| !b.is_page_break())
        .filter_map(LayoutBox::line_space)
        .sum();
    sum * scaling
}

#[derive(Debug, Clone)]
pub struct Paginator {
    geometry: PageGeometry,
    queue: VecDeque<Flowable>,
    /// Never empty; the last page is the one being filled.
    pages: Vec<Page>,
}

impl Paginator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            queue: VecDeque::new(),
            pages: vec![Page::new(1)],
        }
    }

    #[inline]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn add_flowable(&mut self, flowable: Flowable) {
        self.queue.push_back(flowable);
    }

    /// Number of flowables waiting for [`Paginator::paginate`].
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn paginate(&mut self) {
        while let Some(flowable) = self.queue.pop_front() {
            self.place(flowable);
        }
    }

    /// Paginate pending flowables and return the number of pages.
    pub fn page_count(&mut self) -> usize {
        self.paginate();
        self.pages.len()
    }

    /// Pages laid out so far; flowables still queued are not included.
    #[inline]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Paginate pending flowables and hand out the pages.
    pub fn into_pages(mut self) -> Vec<Page> {
        self.paginate();
        self.pages
    }

    fn place(&mut self, flowable: Flowable) {
        let scaling = self.geometry.scaling;
        let capacity = self.geometry.vertical_space();
        let needed = extent(&flowable, scaling);

        if needed > capacity {
            warn!(
                "flowable of {needed} pts does not fit a page of {capacity} pts, \
                 spilling over"
            );
        }

        let current = self.current();
        if !current.is_empty() && needed + current.extent() > capacity {
            self.new_page();
        }

        for layout_box in flowable {
            if self.current().is_empty()
                && matches!(
                    layout_box,
                    LayoutBox::PageBreak
                        | LayoutBox::LineFeed(_)
                        | LayoutBox::CarriageReturn
                )
            {
                continue;
            }

            if layout_box.is_page_break() {
                self.new_page();
                continue;
            }

            let page = self.current_mut();
            page.push(layout_box, scaling);
            if page.extent() > capacity {
                self.new_page();
            }
        }
    }

    #[inline]
    fn current(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    #[inline]
    fn current_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        debug!("starting page {number}");
        self.pages.push(Page::new(number));
    }
}
