//! In-memory reference surface
//!
//! [`Canvas`] keeps everything handed to it and autoscales the way a typical
//! plotting axes does: data limits grow with individually added shapes (not
//! with collections), view limits get a relative margin on each side, and
//! the margin stops at any sticky bound it would cross.

use glam::DVec2;

use crate::render::defaults;
use crate::render::shapes::{BarContainer, BarShape, ShapeCollection};
use crate::surface::{AutoscaleBound, CollectionId, ShapeId, Surface, Transform};
use crate::types::{Axis, BBox};

/// Padding applied to a degenerate (zero-span) axis, relative to its value
const NONSINGULAR_EXPANDER: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Canvas {
    /// Plotting area in pixels
    pixel_box: BBox,
    dpi: f64,
    margin: f64,
    container_metadata: bool,
    data_lim: BBox,
    view_lim: BBox,
    stickies: Vec<AutoscaleBound>,
    shapes: Vec<BarShape>,
    containers: Vec<BarContainer>,
    collections: Vec<ShapeCollection>,
}

impl Canvas {
    /// A `width × height` pixel plotting area at `dpi`
    pub fn new(width: f64, height: f64, dpi: f64) -> Self {
        Self {
            pixel_box: BBox::from_corners(DVec2::ZERO, DVec2::new(width, height)),
            dpi,
            margin: defaults::AXES_MARGIN,
            container_metadata: true,
            data_lim: BBox::new(),
            view_lim: BBox::from_corners(DVec2::ZERO, DVec2::ONE),
            stickies: Vec::new(),
            shapes: Vec::new(),
            containers: Vec::new(),
            collections: Vec::new(),
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Simulate a surface whose containers cannot carry metadata
    pub fn with_container_metadata(mut self, supported: bool) -> Self {
        self.container_metadata = supported;
        self
    }

    pub fn shapes(&self) -> &[BarShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&BarShape> {
        self.shapes.get(id.0)
    }

    pub fn containers(&self) -> &[BarContainer] {
        &self.containers
    }

    pub fn collections(&self) -> &[ShapeCollection] {
        &self.collections
    }

    pub fn sticky_bounds(&self) -> &[AutoscaleBound] {
        &self.stickies
    }

    pub fn data_limits(&self) -> BBox {
        self.data_lim
    }

    pub fn view_limits(&self) -> BBox {
        self.view_lim
    }

    /// A shape's clip outline in pixels under the current view
    pub fn clip_outline_px(&self, id: ShapeId) -> Option<[DVec2; 5]> {
        let clip = self.shape(id)?.clip.as_ref()?;
        Some(clip.outline_px(self.data_to_pixel_transform()))
    }

    fn view_interval(&self, axis: Axis) -> (f64, f64) {
        let (lo, hi) = if self.data_lim.is_empty() {
            (0.0, 1.0)
        } else {
            self.data_lim.interval(axis)
        };
        let (lo, hi) = nonsingular(lo, hi);

        let delta = (hi - lo) * self.margin;
        let mut low = lo - delta;
        let mut high = hi + delta;

        let stops = self
            .stickies
            .iter()
            .filter(|b| b.axis == axis)
            .flat_map(|b| [b.lower, b.upper])
            .filter(|v| v.is_finite());
        for stop in stops {
            if stop <= lo {
                low = low.max(stop);
            }
            if stop >= hi {
                high = high.min(stop);
            }
        }
        (low, high)
    }
}

fn nonsingular(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo > f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        return (lo, hi);
    }
    if hi == 0.0 && lo == 0.0 {
        (-NONSINGULAR_EXPANDER, NONSINGULAR_EXPANDER)
    } else {
        (lo - NONSINGULAR_EXPANDER * lo.abs(), hi + NONSINGULAR_EXPANDER * hi.abs())
    }
}

impl Surface for Canvas {
    fn add_shape(&mut self, shape: BarShape) -> ShapeId {
        let bbox = shape.rect.bbox();
        self.data_lim.expand_point(bbox.min);
        self.data_lim.expand_point(bbox.max);
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    fn add_container(&mut self, container: BarContainer) {
        self.containers.push(container);
    }

    fn supports_container_metadata(&self) -> bool {
        self.container_metadata
    }

    fn add_collection(&mut self, collection: ShapeCollection) -> CollectionId {
        self.collections.push(collection);
        CollectionId(self.collections.len() - 1)
    }

    fn collection(&self, id: CollectionId) -> Option<&ShapeCollection> {
        self.collections.get(id.0)
    }

    fn collection_mut(&mut self, id: CollectionId) -> Option<&mut ShapeCollection> {
        self.collections.get_mut(id.0)
    }

    fn register_sticky_bound(&mut self, bound: AutoscaleBound) {
        self.stickies.push(bound);
    }

    fn merge_data_bounds(&mut self, vertices: &[DVec2]) {
        for &v in vertices {
            self.data_lim.expand_point(v);
        }
    }

    fn data_to_pixel_transform(&self) -> Transform {
        let scale = self.pixel_box.size() / self.view_lim.size();
        Transform::from_translation(self.pixel_box.min)
            * Transform::from_scale(scale)
            * Transform::from_translation(-self.view_lim.min)
    }

    fn view_dpi(&self) -> f64 {
        self.dpi
    }

    fn autoscale(&mut self) {
        let (x0, x1) = self.view_interval(Axis::X);
        let (y0, y1) = self.view_interval(Axis::Y);
        self.view_lim = BBox::from_corners(DVec2::new(x0, y0), DVec2::new(x1, y1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn margins_stop_at_sticky_zero() {
        let mut canvas = Canvas::new(100.0, 100.0, 100.0);
        canvas.merge_data_bounds(&[dvec2(-0.5, 0.0), dvec2(1.5, 10.0)]);
        canvas.register_sticky_bound(AutoscaleBound::from_zero(Axis::Y));
        canvas.autoscale();
        let view = canvas.view_limits();
        assert_eq!(view.interval(Axis::Y), (0.0, 10.5));
        assert_eq!(view.interval(Axis::X), (-0.6, 1.6));
    }

    #[test]
    fn degenerate_axis_is_widened() {
        let mut canvas = Canvas::new(100.0, 100.0, 100.0).with_margin(0.0);
        canvas.merge_data_bounds(&[dvec2(2.0, 0.0)]);
        canvas.autoscale();
        assert_eq!(canvas.view_limits().interval(Axis::X), (1.9, 2.1));
        assert_eq!(canvas.view_limits().interval(Axis::Y), (-0.05, 0.05));
    }

    #[test]
    fn transform_maps_view_onto_pixels() {
        let mut canvas = Canvas::new(200.0, 100.0, 100.0).with_margin(0.0);
        canvas.merge_data_bounds(&[dvec2(0.0, 0.0), dvec2(4.0, 2.0)]);
        canvas.autoscale();
        let t = canvas.data_to_pixel_transform();
        assert_eq!(t.transform_point2(dvec2(0.0, 0.0)), dvec2(0.0, 0.0));
        assert_eq!(t.transform_point2(dvec2(4.0, 2.0)), dvec2(200.0, 100.0));
        assert_eq!(t.transform_point2(dvec2(1.0, 1.0)), dvec2(50.0, 50.0));
    }

    #[test]
    fn collections_leave_data_limits_alone() {
        let mut canvas = Canvas::new(100.0, 100.0, 100.0);
        canvas.add_collection(ShapeCollection::new());
        assert!(canvas.data_limits().is_empty());
        canvas.autoscale();
        assert_eq!(canvas.view_limits().interval(Axis::X), (-0.05, 1.05));
    }
}
