//! Edge (stroke) patterns

use std::str::FromStr;

use crate::config::StyleConfig;
use crate::errors::StyleParseError;

/// A resolved stroke pattern: offset plus alternating on/off lengths in
/// points. `dashes == None` is a solid line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    pub offset: f64,
    pub dashes: Option<Vec<f64>>,
}

impl DashPattern {
    pub const SOLID: DashPattern = DashPattern { offset: 0.0, dashes: None };

    /// Build a pattern, normalizing the offset into one dash cycle
    pub fn new(offset: f64, dashes: Option<Vec<f64>>) -> Self {
        let cycle: f64 = dashes.iter().flatten().sum();
        let offset = if cycle != 0.0 && cycle.is_finite() {
            offset.rem_euclid(cycle)
        } else {
            offset
        };
        Self { offset, dashes }
    }

    /// True when the pattern has at least one dash segment
    pub fn is_dashed(&self) -> bool {
        self.dashes.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Same offset with every dash length halved
    pub fn halved(&self) -> Self {
        Self {
            offset: self.offset,
            dashes: self
                .dashes
                .as_ref()
                .map(|d| d.iter().map(|x| x / 2.0).collect()),
        }
    }
}

/// An authored line style; the named dash patterns come from the config.
#[derive(Debug, Clone, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    Custom(DashPattern),
}

impl LineStyle {
    pub fn to_pattern(&self, config: &StyleConfig) -> DashPattern {
        match self {
            LineStyle::Solid => DashPattern::SOLID,
            LineStyle::Dashed => DashPattern::new(0.0, Some(config.dashed_pattern.clone())),
            LineStyle::DashDot => DashPattern::new(0.0, Some(config.dashdot_pattern.clone())),
            LineStyle::Dotted => DashPattern::new(0.0, Some(config.dotted_pattern.clone())),
            LineStyle::Custom(p) => p.clone(),
        }
    }
}

impl FromStr for LineStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_line_style(s)
    }
}
