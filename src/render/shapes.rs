//! Shapes handed to a surface
//!
//! - [`BarShape`]: one individually drawn bar (immediate strategy)
//! - [`ShapeCollection`]: all bars for one surface (batch strategy)
//! - [`BarContainer`]: per-split results record for annotation tools

use glam::DVec2;

use crate::surface::{AutoscaleBound, ShapeId, Transform};
use crate::types::{Orientation, Points};

use super::geometry::{Bar, Rectangle};
use crate::properties::ResolvedStyle;

/// A clip outline: the bar's own (un-widened) outline in data units.
///
/// Placed with the surface's data-to-pixel transform current at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPath {
    pub outline: [DVec2; 5],
}

impl ClipPath {
    /// The outline in surface pixels under `transform`
    pub fn outline_px(&self, transform: Transform) -> [DVec2; 5] {
        self.outline.map(|p| transform.transform_point2(p))
    }
}

/// One bar drawn as its own shape
#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    pub rect: Rectangle,
    /// Style as drawn; after [`BarShape::apply_stroke_clip`] the stroke is
    /// twice the authored width
    pub style: ResolvedStyle,
    pub clip: Option<ClipPath>,
    /// Also clip to the surface's plotting area
    pub clip_to_plot_area: bool,
    pub sticky_edges: Option<AutoscaleBound>,
}

impl BarShape {
    pub fn new(rect: Rectangle, style: ResolvedStyle) -> Self {
        Self {
            rect,
            style,
            clip: None,
            clip_to_plot_area: true,
            sticky_edges: None,
        }
    }

    /// Stroke/clip compensation.
    ///
    /// Clipping a stroked bar to its own outline hides the outer half of the
    /// stroke, so the stroke is doubled (dashes halved to keep their drawn
    /// length) before the clip is set. Neighboring bars then never paint over
    /// each other's edges.
    pub fn apply_stroke_clip(&mut self) {
        self.style.edge_width = self.style.edge_width * 2.0;
        if self.style.edge_style.is_dashed() {
            self.style.edge_style = self.style.edge_style.halved();
        }
        self.clip = Some(ClipPath { outline: self.rect.vertices() });
    }

    /// Width of the stroke as it appears after clipping
    pub fn visible_edge_width(&self) -> Points {
        match self.clip {
            Some(_) => self.style.edge_width / 2.0,
            None => self.style.edge_width,
        }
    }
}

impl From<Bar> for BarShape {
    fn from(bar: Bar) -> Self {
        BarShape::new(bar.rect, bar.style)
    }
}

/// All bars bound for one surface, drawn in a single batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeCollection {
    pub members: Vec<Bar>,
    pub sticky_edges: Option<AutoscaleBound>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        self.members.extend(bars);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Outline vertices of every member, in member order
    pub fn vertices(&self) -> Vec<DVec2> {
        self.members.iter().flat_map(|b| b.rect.vertices()).collect()
    }

    /// Set one stroke width on every member
    pub fn set_line_width(&mut self, width: Points) {
        for member in &mut self.members {
            member.style.edge_width = width;
        }
    }
}

/// Results of one immediate-mode split, for label placement and similar
/// downstream tools.
#[derive(Debug, Clone, PartialEq)]
pub struct BarContainer {
    pub shapes: Vec<ShapeId>,
    /// `value − baseline` of each shape
    pub datavalues: Option<Vec<f64>>,
    pub orientation: Option<Orientation>,
}

impl BarContainer {
    pub fn new(shapes: Vec<ShapeId>, datavalues: Vec<f64>, orientation: Orientation) -> Self {
        Self {
            shapes,
            datavalues: Some(datavalues),
            orientation: Some(orientation),
        }
    }

    /// Drop the value/orientation metadata for surfaces that cannot use it
    pub fn without_metadata(self) -> Self {
        Self {
            shapes: self.shapes,
            datavalues: None,
            orientation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::linestyle::DashPattern;
    use glam::dvec2;

    fn style(width: f64, dashes: Option<Vec<f64>>) -> ResolvedStyle {
        ResolvedStyle {
            fill_color: Rgba::BLACK,
            edge_color: Rgba::BLACK,
            edge_width: Points(width),
            edge_style: DashPattern::new(1.0, dashes),
            fill: 1.0,
        }
    }

    #[test]
    fn stroke_clip_doubles_width_and_halves_dashes() {
        let rect = Rectangle::bar(Orientation::Vertical, 0.0, 1.0, 0.0, 2.0);
        let mut shape = BarShape::new(rect, style(1.5, Some(vec![4.0, 2.0])));
        shape.apply_stroke_clip();

        assert_eq!(shape.style.edge_width, Points(3.0));
        assert_eq!(shape.visible_edge_width(), Points(1.5));
        assert_eq!(shape.style.edge_style, DashPattern { offset: 1.0, dashes: Some(vec![2.0, 1.0]) });

        let clip = shape.clip.as_ref().unwrap();
        assert_eq!(clip.outline, rect.vertices());
        assert_eq!(clip.outline_px(Transform::from_scale(dvec2(10.0, 20.0)))[2], dvec2(5.0, 40.0));
    }

    #[test]
    fn solid_stroke_keeps_no_dashes() {
        let rect = Rectangle::bar(Orientation::Vertical, 0.0, 1.0, 0.0, 2.0);
        let mut shape = BarShape::new(rect, style(1.0, None));
        shape.apply_stroke_clip();
        assert_eq!(shape.style.edge_style.dashes, None);
    }

    #[test]
    fn container_metadata_can_be_stripped() {
        let container = BarContainer::new(vec![ShapeId(0)], vec![5.0], Orientation::Vertical);
        assert_eq!(container.orientation, Some(Orientation::Vertical));
        let bare = container.without_metadata();
        assert_eq!(bare.shapes, vec![ShapeId(0)]);
        assert_eq!(bare.datavalues, None);
        assert_eq!(bare.orientation, None);
    }
}
