use serde::{Deserialize, Serialize};

use crate::error::{PagerError, Result};

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimetres to PDF points.
#[inline]
pub fn mm_to_pts(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Page size and margins in points, plus the global scaling factor.
///
/// Missing JSON fields fall back to [`PageGeometry::a4`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub left_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    /// Applied to font sizes, line spacing and graphics; not to the page.
    pub scaling: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with 15 mm left, 25 mm top and 10 mm bottom margin.
    pub fn a4() -> Self {
        Self::from_mm(210.0, 297.0)
            .with_left_margin_mm(15.0)
            .with_top_margin_mm(25.0)
            .with_bottom_margin_mm(10.0)
    }

    /// Page of the given size without margins. Every length is rounded to
    /// whole points.
    pub fn from_mm(width: f64, height: f64) -> Self {
        Self {
            width: mm_to_pts(width).round(),
            height: mm_to_pts(height).round(),
            left_margin: 0.0,
            top_margin: 0.0,
            bottom_margin: 0.0,
            scaling: 1.0,
        }
    }

    pub fn with_left_margin_mm(mut self, margin: f64) -> Self {
        self.left_margin = mm_to_pts(margin).round();
        self
    }

    pub fn with_top_margin_mm(mut self, margin: f64) -> Self {
        self.top_margin = mm_to_pts(margin).round();
        self
    }

    pub fn with_bottom_margin_mm(mut self, margin: f64) -> Self {
        self.bottom_margin = mm_to_pts(margin).round();
        self
    }

    pub fn with_scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let geometry: Self = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Printable height of a page.
    #[inline]
    pub fn vertical_space(&self) -> f64 {
        self.height - self.top_margin - self.bottom_margin
    }

    /// Left end of every printed line.
    #[inline]
    pub fn x_start(&self) -> f64 {
        self.left_margin
    }

    /// Baseline of the first line on a page.
    #[inline]
    pub fn y_start(&self) -> f64 {
        self.height - self.top_margin
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(PagerError::InvalidGeometry(format!(
                "page size {}x{} pts",
                self.width, self.height
            )));
        }
        if !positive(self.scaling) {
            return Err(PagerError::InvalidGeometry(format!(
                "scaling factor {}",
                self.scaling
            )));
        }
        if ![self.left_margin, self.top_margin, self.bottom_margin]
            .into_iter()
            .all(non_negative)
        {
            return Err(PagerError::InvalidGeometry(
                "margins must not be negative".to_owned(),
            ));
        }
        if self.left_margin >= self.width {
            return Err(PagerError::InvalidGeometry(format!(
                "left margin {} pts leaves no room on a {} pts wide page",
                self.left_margin, self.width
            )));
        }
        if self.vertical_space() <= 0.0 {
            return Err(PagerError::InvalidGeometry(format!(
                "margins leave no vertical space on a {} pts high page",
                self.height
            )));
        }

        Ok(())
    }
}
