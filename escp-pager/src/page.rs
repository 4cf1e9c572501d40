use escp_decoder::LayoutBox;

/// One output page: the boxes placed on it and their vertical extent.
///
/// Pages are only appended to while they are the current page of the
/// paginator. Page breaks are consumed by pagination and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    number: usize,
    boxes: Vec<LayoutBox>,
    extent: f64,
}

impl Page {
    pub(crate) fn new(number: usize) -> Self {
        Self {
            number,
            boxes: Vec::new(),
            extent: 0.0,
        }
    }

    /// 1-based page number.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Sum of the scaled line feeds on this page, in points.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn into_boxes(self) -> Vec<LayoutBox> {
        self.boxes
    }

    pub(crate) fn push(&mut self, layout_box: LayoutBox, scaling: f64) {
        if let Some(line_space) = layout_box.line_space() {
            self.extent += line_space * scaling;
        }
        self.boxes.push(layout_box);
    }
}
