//! Automatic edge width for batched bars
//!
//! The width is measured in pixels on each surface (surfaces can have very
//! different pixels-per-unit), converted to points, and reduced to one
//! global minimum. Every collection then gets the same stroke:
//!
//! ```text
//! width = min(0.1 * narrowest bar in points, patch_linewidth)
//! ```

use crate::config::StyleConfig;
use crate::data::SurfaceId;
use crate::errors::BarError;
use crate::log::{debug, warn};
use crate::surface::{CollectionId, Surface, SurfaceSet};
use crate::types::{Orientation, Points, Px};

use super::defaults;
use super::shapes::ShapeCollection;
use super::unknown_surface;

pub struct EdgeWidthHeuristic<'a> {
    orient: Orientation,
    config: &'a StyleConfig,
}

impl<'a> EdgeWidthHeuristic<'a> {
    pub fn new(orient: Orientation, config: &'a StyleConfig) -> Self {
        Self { orient, config }
    }

    /// Category-axis width of every member, in points on `surface`.
    ///
    /// Non-finite measurements are dropped.
    pub fn measure(&self, surface: &dyn Surface, collection: &ShapeCollection) -> Vec<Points> {
        let axis = self.orient.category_axis();
        let transform = surface.data_to_pixel_transform();
        let dpi = surface.view_dpi();

        collection
            .members
            .iter()
            .filter_map(|bar| {
                let (edge, width) = bar.rect.span(axis);
                let start = transform.transform_point2(self.orient.to_xy(edge, 0.0));
                let end = transform.transform_point2(self.orient.to_xy(edge + width, 0.0));
                let points = Px(axis.of(end - start).abs()).to_points(dpi);
                if points.raw().is_finite() {
                    Some(points)
                } else {
                    warn!(edge, width, dpi, "skipping bar with non-finite pixel width");
                    None
                }
            })
            .collect()
    }

    /// Autoscale, measure, and broadcast the resulting width to every
    /// collection. Returns `None` (leaving all widths alone) when there is
    /// nothing to measure.
    pub fn apply(
        &self,
        surfaces: &mut dyn SurfaceSet,
        collections: &[(SurfaceId, CollectionId)],
    ) -> Result<Option<Points>, BarError> {
        let mut any_bars = false;
        for &(surface_id, collection_id) in collections {
            let surface = surfaces.surface(surface_id).ok_or_else(|| unknown_surface(surface_id))?;
            any_bars |= !collection_of(surface, collection_id)?.is_empty();
        }
        if !any_bars {
            debug!("no bars to measure; keeping default edge width");
            return Ok(None);
        }

        // Gather: every surface must have final view limits before measuring
        for &(surface_id, _) in collections {
            super::surface_mut(surfaces, surface_id)?.autoscale();
        }

        let mut narrowest: Option<Points> = None;
        for &(surface_id, collection_id) in collections {
            let surface = surfaces.surface(surface_id).ok_or_else(|| unknown_surface(surface_id))?;
            let collection = collection_of(surface, collection_id)?;
            for points in self.measure(surface, collection) {
                narrowest = Some(narrowest.map_or(points, |n| n.min(points)));
            }
        }
        let Some(narrowest) = narrowest else {
            return Ok(None);
        };

        let width = (narrowest * defaults::AUTO_EDGE_FRACTION).min(self.config.patch_linewidth);
        debug!(%narrowest, %width, "automatic edge width");

        // Broadcast
        for &(surface_id, collection_id) in collections {
            let surface = super::surface_mut(surfaces, surface_id)?;
            if let Some(collection) = surface.collection_mut(collection_id) {
                collection.set_line_width(width);
            }
        }
        Ok(Some(width))
    }
}

fn collection_of(surface: &dyn Surface, id: CollectionId) -> Result<&ShapeCollection, BarError> {
    surface
        .collection(id)
        .ok_or_else(|| BarError::contract(format!("surface no longer holds collection #{}", id.0)))
}
