//! Render passes for bar marks
//!
//! This module is organized into submodules:
//! - `defaults`: Default style settings
//! - `geometry`: Rectangle geometry and the zero-value filter
//! - `shapes`: Shapes, collections and results containers
//! - `immediate`: One shape per bar with stroke/clip compensation
//! - `batch`: One collection per surface
//! - `heuristic`: Automatic edge width for batched bars

pub mod batch;
pub mod defaults;
pub mod geometry;
pub mod heuristic;
pub mod immediate;
pub mod shapes;

use enum_dispatch::enum_dispatch;

use crate::config::StyleConfig;
use crate::data::{Split, SurfaceId};
use crate::errors::{BarError, ContractViolationError};
use crate::mark::{BarMark, Mappable, Strategy};
use crate::properties::Attribute;
use crate::scale::ScaleRegistry;
use crate::surface::{Surface, SurfaceSet};
use crate::types::{Orientation, Points};

pub use batch::BatchRenderer;
pub use heuristic::EdgeWidthHeuristic;
pub use immediate::ImmediateRenderer;

/// Everything a render pass reads; shared by every split of the pass
#[derive(Clone, Copy)]
pub struct RenderPass<'a> {
    pub mark: &'a BarMark,
    pub scales: &'a dyn ScaleRegistry,
    pub orient: Orientation,
    pub config: &'a StyleConfig,
}

impl<'a> RenderPass<'a> {
    pub fn new(
        mark: &'a BarMark,
        scales: &'a dyn ScaleRegistry,
        orient: Orientation,
        config: &'a StyleConfig,
    ) -> Self {
        Self { mark, scales, orient, config }
    }

    /// Edge width is left automatic and no scale maps it
    pub fn wants_auto_edge_width(&self) -> bool {
        matches!(self.mark.edgewidth, Mappable::Auto) && self.scales.resolve(Attribute::EdgeWidth).is_none()
    }
}

/// Outcome of a render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    /// Bars handed to surfaces
    pub shapes: usize,
    /// Rows dropped by the zero-value filter
    pub skipped: usize,
    /// Edge width chosen by the automatic heuristic, when it ran
    pub edge_width: Option<Points>,
}

/// A strategy for turning splits into shapes on surfaces
#[enum_dispatch]
pub trait Renderer {
    fn render(
        &self,
        pass: &RenderPass<'_>,
        splits: &mut dyn Iterator<Item = Split>,
        surfaces: &mut dyn SurfaceSet,
    ) -> Result<RenderSummary, BarError>;
}

#[enum_dispatch(Renderer)]
#[derive(Debug, Clone, Copy)]
pub enum RenderStrategy {
    Immediate(ImmediateRenderer),
    Batch(BatchRenderer),
}

impl RenderStrategy {
    pub fn for_mark(mark: &BarMark) -> Self {
        match mark.strategy {
            Strategy::Immediate => ImmediateRenderer.into(),
            Strategy::Batch => BatchRenderer.into(),
        }
    }
}

/// Look up a surface, failing on handles the set does not know
pub(crate) fn surface_mut(surfaces: &mut dyn SurfaceSet, id: SurfaceId) -> Result<&mut dyn Surface, BarError> {
    surfaces.surface_mut(id).ok_or_else(|| unknown_surface(id))
}

pub(crate) fn unknown_surface(id: SurfaceId) -> BarError {
    ContractViolationError::new(format!("split targets unknown surface #{}", id.0))
        .with_help("every split's surface handle must name a surface in the set")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use crate::scale::{Mapped, ScaleFailure, Scales};

    #[test]
    fn strategy_follows_mark() {
        assert!(matches!(RenderStrategy::for_mark(&BarMark::bar()), RenderStrategy::Immediate(_)));
        assert!(matches!(RenderStrategy::for_mark(&BarMark::bars()), RenderStrategy::Batch(_)));
    }

    #[test]
    fn auto_edge_width_needs_auto_and_no_scale() {
        let config = StyleConfig::default();
        let none = Scales::new();
        let mark = BarMark::bars();
        assert!(RenderPass::new(&mark, &none, Orientation::Vertical, &config).wants_auto_edge_width());

        let fixed = BarMark::bars().with_edgewidth(1.0);
        assert!(!RenderPass::new(&fixed, &none, Orientation::Vertical, &config).wants_auto_edge_width());

        let mapped = Scales::new().with(Attribute::EdgeWidth, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Numbers(vec![]))
        });
        assert!(!RenderPass::new(&mark, &mapped, Orientation::Vertical, &config).wants_auto_edge_width());
    }
}
