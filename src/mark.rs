//! Authored bar-mark configuration

use crate::color::ColorSpec;
use crate::config::RcParam;
use crate::linestyle::LineStyle;
use crate::properties::Attribute;

/// How an attribute gets its value when it is not directly specified.
#[derive(Debug, Clone, PartialEq)]
pub enum Mappable<P> {
    /// Directly specified by the author; always wins
    Value(P),
    /// Fallback when the data carries no column for the attribute
    Default(P),
    /// Fallback taken from the style configuration
    Rc(RcParam),
    /// Fallback: whatever another attribute resolves to
    Depend(Attribute),
    /// Deferred to a per-pass computation (edge width only)
    Auto,
}

impl<P> Mappable<P> {
    pub fn is_auto(&self) -> bool {
        matches!(self, Mappable::Auto)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Mappable::Value(_))
    }
}

/// Which renderer a mark uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One shape per bar, stroke clipped to its own outline
    Immediate,
    /// One collection per surface, automatic edge width
    Batch,
}

/// A rectangular mark drawn between baseline and data values
#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub strategy: Strategy,
    pub color: Mappable<ColorSpec>,
    pub alpha: Mappable<f64>,
    pub fill: Mappable<bool>,
    pub edgecolor: Mappable<ColorSpec>,
    pub edgealpha: Mappable<f64>,
    pub edgewidth: Mappable<f64>,
    pub edgestyle: Mappable<LineStyle>,
    /// Bar width handed to the layout stage
    pub width: f64,
    /// Baseline handed to the layout stage
    pub baseline: f64,
    /// Clip shapes to the plotting area
    pub clip_on: bool,
}

impl BarMark {
    /// Individually drawn bars whose edges follow the face color
    pub fn bar() -> Self {
        Self {
            strategy: Strategy::Immediate,
            color: Mappable::Default(ColorSpec::Cycle(0)),
            alpha: Mappable::Default(0.7),
            fill: Mappable::Default(true),
            edgecolor: Mappable::Depend(Attribute::Color),
            edgealpha: Mappable::Default(1.0),
            edgewidth: Mappable::Rc(RcParam::PatchLineWidth),
            edgestyle: Mappable::Default(LineStyle::Solid),
            width: 0.8,
            baseline: 0.0,
            clip_on: true,
        }
    }

    /// Batched bars with histogram-friendly defaults
    pub fn bars() -> Self {
        Self {
            strategy: Strategy::Batch,
            color: Mappable::Default(ColorSpec::Cycle(0)),
            alpha: Mappable::Default(0.7),
            fill: Mappable::Default(true),
            edgecolor: Mappable::Rc(RcParam::PatchEdgeColor),
            edgealpha: Mappable::Default(1.0),
            edgewidth: Mappable::Auto,
            edgestyle: Mappable::Default(LineStyle::Solid),
            width: 1.0,
            baseline: 0.0,
            clip_on: true,
        }
    }

    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Mappable::Value(color.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Mappable::Value(alpha);
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = Mappable::Value(fill);
        self
    }

    pub fn with_edgecolor(mut self, color: impl Into<ColorSpec>) -> Self {
        self.edgecolor = Mappable::Value(color.into());
        self
    }

    pub fn with_edgealpha(mut self, alpha: f64) -> Self {
        self.edgealpha = Mappable::Value(alpha);
        self
    }

    pub fn with_edgewidth(mut self, width: f64) -> Self {
        self.edgewidth = Mappable::Value(width);
        self
    }

    pub fn with_edgestyle(mut self, style: LineStyle) -> Self {
        self.edgestyle = Mappable::Value(style);
        self
    }

    pub fn with_clip_on(mut self, clip_on: bool) -> Self {
        self.clip_on = clip_on;
        self
    }
}
