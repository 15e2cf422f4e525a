//! Rectangle geometry and the zero-value filter
//!
//! Geometry is computed in (category, value) space and mirrored into screen
//! coordinates through [`Orientation::to_xy`], so both orientations share one
//! code path.

use glam::{DVec2, Vec2Swizzles};

use crate::data::RowTable;
use crate::errors::{BarError, ContractViolationError};
use crate::log::debug;
use crate::properties::{PropertyResolver, ResolvedStyle};
use crate::types::{Axis, BBox, Orientation};

use super::RenderPass;

/// An axis-aligned rectangle in data units.
///
/// `size` may have a negative component along the value axis (bars below
/// their baseline); the category extent is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rectangle {
    /// The bar for one row: `position ± width/2` along the category axis,
    /// `baseline → value` along the value axis.
    pub fn bar(orient: Orientation, position: f64, width: f64, baseline: f64, value: f64) -> Self {
        Self {
            origin: orient.to_xy(position - width / 2.0, baseline),
            size: orient.to_xy(width, value - baseline),
        }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn w(&self) -> f64 {
        self.size.x
    }

    pub fn h(&self) -> f64 {
        self.size.y
    }

    /// Closed outline, counter-clockwise from the origin
    pub fn vertices(&self) -> [DVec2; 5] {
        let o = self.origin;
        let DVec2 { x: w, y: h } = self.size;
        [o, o + DVec2::new(w, 0.0), o + self.size, o + DVec2::new(0.0, h), o]
    }

    pub fn bbox(&self) -> BBox {
        BBox::from_corners(self.origin, self.origin + self.size)
    }

    /// `(lower edge, extent)` along one axis
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        let start = axis.of(self.origin);
        let extent = axis.of(self.size);
        (start.min(start + extent), extent.abs())
    }

    /// Signed extent along the value axis (`value − baseline`)
    pub fn value_extent(&self, orient: Orientation) -> f64 {
        orient.value_axis().of(self.size)
    }

    /// Swap the roles of x and y
    pub fn transposed(&self) -> Self {
        Self { origin: self.origin.yx(), size: self.size.yx() }
    }
}

/// Whether a bar with this value extent draws anything (NaN counts as zero)
pub fn keeps(value_extent: f64) -> bool {
    let v = if value_extent.is_nan() { 0.0 } else { value_extent };
    v != 0.0
}

/// A rectangle with its resolved style, ready to become a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub rect: Rectangle,
    pub style: ResolvedStyle,
    /// `value − baseline`, reported to results containers
    pub value: f64,
}

/// Bars built from one row table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarGeometry {
    pub bars: Vec<Bar>,
    /// Rows dropped by the zero-value filter
    pub skipped: usize,
}

struct GeometryColumns<'d> {
    position: &'d [f64],
    value: &'d [f64],
    width: &'d [f64],
    baseline: &'d [f64],
}

impl<'d> GeometryColumns<'d> {
    fn read(data: &'d RowTable, orient: Orientation) -> Result<Self, BarError> {
        let columns = Self {
            position: data.numbers(orient.position_column())?,
            value: data.numbers(orient.value_column())?,
            width: data.numbers("width")?,
            baseline: data.numbers("baseline")?,
        };
        if let Some(w) = columns.width.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(ContractViolationError::new(format!("bar width must be positive and finite, got {w}"))
                .with_help("the layout stage assigns each row a positive category extent")
                .into());
        }
        Ok(columns)
    }
}

/// Validate, resolve and lay out every row of `data`, dropping zero-value
/// rows. Nothing is computed unless every required column is present.
pub fn make_bars(data: &RowTable, pass: &RenderPass<'_>) -> Result<BarGeometry, BarError> {
    let columns = GeometryColumns::read(data, pass.orient)?;
    let props = PropertyResolver::new(pass.mark, pass.scales, pass.config).resolve(data)?;

    let mut geometry = BarGeometry::default();
    for row in 0..data.len() {
        let rect = Rectangle::bar(
            pass.orient,
            columns.position[row],
            columns.width[row],
            columns.baseline[row],
            columns.value[row],
        );
        let value = rect.value_extent(pass.orient);
        if !keeps(value) {
            geometry.skipped += 1;
            continue;
        }
        let style = props
            .style(row)
            .ok_or_else(|| BarError::contract(format!("no resolved style for row {row}")))?;
        geometry.bars.push(Bar { rect, style, value });
    }

    debug!(rows = data.len(), kept = geometry.bars.len(), "laid out bars");
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;
    use crate::data::Column;
    use crate::mark::BarMark;
    use crate::scale::Scales;
    use glam::dvec2;

    fn rows(orient: Orientation, values: Vec<f64>) -> RowTable {
        let n = values.len();
        RowTable::from_columns([
            (orient.position_column(), Column::from((0..n).map(|i| i as f64).collect::<Vec<_>>())),
            (orient.value_column(), Column::from(values)),
            ("width", Column::from(vec![0.8; n])),
            ("baseline", Column::from(vec![0.0; n])),
        ])
        .unwrap()
    }

    #[test]
    fn vertical_and_horizontal_are_transposes() {
        let v = Rectangle::bar(Orientation::Vertical, 2.0, 0.8, 1.0, 4.0);
        assert_eq!(v.origin, dvec2(1.6, 1.0));
        assert_eq!(v.size, dvec2(0.8, 3.0));
        let h = Rectangle::bar(Orientation::Horizontal, 2.0, 0.8, 1.0, 4.0);
        assert_eq!(h, v.transposed());
    }

    #[test]
    fn negative_values_hang_below_baseline() {
        let r = Rectangle::bar(Orientation::Vertical, 0.0, 1.0, 0.0, -2.0);
        assert_eq!(r.h(), -2.0);
        assert_eq!(r.span(Axis::Y), (-2.0, 2.0));
        assert_eq!(r.bbox().min, dvec2(-0.5, -2.0));
    }

    #[test]
    fn outline_is_closed() {
        let r = Rectangle::bar(Orientation::Vertical, 0.0, 1.0, 0.0, 1.0);
        let v = r.vertices();
        assert_eq!(v[0], v[4]);
        assert_eq!(v[2], dvec2(0.5, 1.0));
    }

    #[test]
    fn filter_treats_nan_as_zero() {
        assert!(keeps(1.0));
        assert!(keeps(-0.5));
        assert!(!keeps(0.0));
        assert!(!keeps(-0.0));
        assert!(!keeps(f64::NAN));
    }

    #[test]
    fn make_bars_skips_zero_and_nan_rows() {
        let mark = BarMark::bar();
        let scales = Scales::new();
        let config = StyleConfig::default();
        let pass = RenderPass::new(&mark, &scales, Orientation::Vertical, &config);
        let data = rows(Orientation::Vertical, vec![5.0, 0.0, f64::NAN, 3.0]);
        let geometry = make_bars(&data, &pass).unwrap();
        assert_eq!(geometry.skipped, 2);
        let values: Vec<f64> = geometry.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![5.0, 3.0]);
    }

    #[test]
    fn make_bars_requires_orientation_columns() {
        let mark = BarMark::bar();
        let scales = Scales::new();
        let config = StyleConfig::default();
        // Vertical columns handed to a horizontal pass: `x` holds positions, not values
        let data = RowTable::from_columns([
            ("x", Column::from(vec![0.0])),
            ("width", Column::from(vec![0.8])),
            ("baseline", Column::from(vec![0.0])),
        ])
        .unwrap();
        let pass = RenderPass::new(&mark, &scales, Orientation::Horizontal, &config);
        let err = make_bars(&data, &pass).unwrap_err();
        assert!(err.to_string().contains("missing column `y`"), "{err}");
    }

    #[test]
    fn make_bars_rejects_non_positive_width() {
        let mark = BarMark::bar();
        let scales = Scales::new();
        let config = StyleConfig::default();
        let pass = RenderPass::new(&mark, &scales, Orientation::Vertical, &config);
        let mut data = rows(Orientation::Vertical, vec![1.0, 2.0]);
        data.insert("width", vec![0.8, 0.0].into()).unwrap();
        let err = make_bars(&data, &pass).unwrap_err();
        assert!(matches!(err, BarError::ContractViolation(_)));
    }
}
