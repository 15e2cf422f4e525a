//! Style configuration threaded through resolution and the edge-width
//! heuristic. Immutable once built; `with_*` methods return modified copies.

use crate::color::{ColorTuple, TAB10};
use crate::render::defaults;
use crate::types::Points;

/// A configuration entry a mark attribute may default to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcParam {
    /// Default patch edge width
    PatchLineWidth,
    /// Default patch edge color
    PatchEdgeColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub patch_linewidth: Points,
    pub patch_edgecolor: ColorTuple,
    /// Color cycle addressed by `C0`, `C1`, ...
    pub palette: Vec<ColorTuple>,
    pub dashed_pattern: Vec<f64>,
    pub dashdot_pattern: Vec<f64>,
    pub dotted_pattern: Vec<f64>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            patch_linewidth: defaults::PATCH_LINEWIDTH,
            patch_edgecolor: ColorTuple::rgb(0.0, 0.0, 0.0),
            palette: TAB10.to_vec(),
            dashed_pattern: defaults::DASHED_PATTERN.to_vec(),
            dashdot_pattern: defaults::DASHDOT_PATTERN.to_vec(),
            dotted_pattern: defaults::DOTTED_PATTERN.to_vec(),
        }
    }
}

impl StyleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patch_linewidth(mut self, width: Points) -> Self {
        self.patch_linewidth = width;
        self
    }

    pub fn with_patch_edgecolor(mut self, color: ColorTuple) -> Self {
        self.patch_edgecolor = color;
        self
    }

    pub fn with_palette(mut self, palette: Vec<ColorTuple>) -> Self {
        self.palette = palette;
        self
    }
}
