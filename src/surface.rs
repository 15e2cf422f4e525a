//! The plotting-surface contract.
//!
//! The engine only talks to a surface through [`Surface`]; it never reads or
//! writes surface state any other way.

use glam::{DAffine2, DVec2};

use crate::data::SurfaceId;
use crate::render::shapes::{BarContainer, BarShape, ShapeCollection};
use crate::types::Axis;

/// Data-to-pixel transform of one surface
pub type Transform = DAffine2;

/// Handle to a shape owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

/// Handle to a collection owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(pub usize);

/// A forced `[lower, upper]` range on one axis that autoscaling must honor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscaleBound {
    pub axis: Axis,
    pub lower: f64,
    pub upper: f64,
}

impl AutoscaleBound {
    /// `(axis, 0, +inf)`: the value axis always reaches down to zero
    pub fn from_zero(axis: Axis) -> Self {
        Self { axis, lower: 0.0, upper: f64::INFINITY }
    }
}

pub trait Surface {
    /// Take ownership of one shape; its extent joins the data limits
    fn add_shape(&mut self, shape: BarShape) -> ShapeId;

    /// Record a results container for downstream annotation tools
    fn add_container(&mut self, container: BarContainer);

    /// Whether containers may carry value and orientation metadata
    fn supports_container_metadata(&self) -> bool {
        true
    }

    /// Take ownership of a collection (data limits are left untouched)
    fn add_collection(&mut self, collection: ShapeCollection) -> CollectionId;

    fn collection(&self, id: CollectionId) -> Option<&ShapeCollection>;

    fn collection_mut(&mut self, id: CollectionId) -> Option<&mut ShapeCollection>;

    fn register_sticky_bound(&mut self, bound: AutoscaleBound);

    /// Merge the extent of `vertices` into the data limits
    fn merge_data_bounds(&mut self, vertices: &[DVec2]);

    fn data_to_pixel_transform(&self) -> Transform;

    fn view_dpi(&self) -> f64;

    /// Finalize view limits from the data registered so far
    fn autoscale(&mut self);
}

/// Addressable set of surfaces (one per facet)
pub trait SurfaceSet {
    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut dyn Surface>;

    fn surface(&self, id: SurfaceId) -> Option<&dyn Surface>;
}

impl<S: Surface> SurfaceSet for [S] {
    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut dyn Surface> {
        self.get_mut(id.0).map(|s| s as &mut dyn Surface)
    }

    fn surface(&self, id: SurfaceId) -> Option<&dyn Surface> {
        self.get(id.0).map(|s| s as &dyn Surface)
    }
}

impl<S: Surface> SurfaceSet for Vec<S> {
    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut dyn Surface> {
        self.as_mut_slice().surface_mut(id)
    }

    fn surface(&self, id: SurfaceId) -> Option<&dyn Surface> {
        self.as_slice().surface(id)
    }
}
