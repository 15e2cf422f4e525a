//! Style attribute resolution and alpha compositing
//!
//! Each attribute is resolved by first choosing a [`ResolutionMode`] (fixed,
//! scale-mapped, identity, default, config, deferred) and then running the
//! single dispatch in [`PropertyResolver::resolve_mode`].

use std::fmt;
use std::str::FromStr;

use crate::color::{ColorSpec, ColorTuple, Rgba};
use crate::config::{RcParam, StyleConfig};
use crate::data::{Column, Datum, RowTable};
use crate::errors::{BarError, ContractViolationError};
use crate::linestyle::{DashPattern, LineStyle};
use crate::mark::{BarMark, Mappable};
use crate::parse::{parse_color, parse_line_style};
use crate::scale::{Mapped, Scale, ScaleRegistry};
use crate::types::Points;

/// Guards against `Depend` cycles between attributes
const MAX_DEPEND_DEPTH: usize = 8;

/// A style attribute of a bar mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Color,
    Alpha,
    Fill,
    EdgeColor,
    EdgeAlpha,
    EdgeWidth,
    EdgeStyle,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Color,
        Attribute::Alpha,
        Attribute::Fill,
        Attribute::EdgeColor,
        Attribute::EdgeAlpha,
        Attribute::EdgeWidth,
        Attribute::EdgeStyle,
    ];

    /// Column / scale name of this attribute
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Color => "color",
            Attribute::Alpha => "alpha",
            Attribute::Fill => "fill",
            Attribute::EdgeColor => "edgecolor",
            Attribute::EdgeAlpha => "edgealpha",
            Attribute::EdgeWidth => "edgewidth",
            Attribute::EdgeStyle => "edgestyle",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ContractViolationError::new(format!("unknown attribute `{s}`")).into())
    }
}

// ============================================================================
// Per-type conversions
// ============================================================================

/// A value type an attribute can be authored in.
///
/// Each implementation knows where its attributes live on [`BarMark`] and how
/// to turn authored values, config entries, raw columns and scale output into
/// its resolved `Output`.
pub trait Property: Sized {
    type Output: Clone + fmt::Debug;

    fn lookup(mark: &BarMark, attribute: Attribute) -> Option<&Mappable<Self>>;

    fn standardize(&self, config: &StyleConfig) -> Self::Output;

    fn from_rc(attribute: Attribute, param: RcParam, _config: &StyleConfig) -> Result<Self::Output, BarError> {
        Err(BarError::resolution(attribute, format!("no {param:?} default for this attribute")))
    }

    fn from_column(attribute: Attribute, column: &Column, config: &StyleConfig) -> Result<Vec<Self::Output>, BarError>;

    fn from_mapped(attribute: Attribute, mapped: Mapped, config: &StyleConfig) -> Result<Vec<Self::Output>, BarError>;
}

fn unexpected(attribute: Attribute, mapped: &Mapped) -> BarError {
    BarError::resolution(attribute, format!("scale produced {}", mapped.kind()))
}

fn colors_from_labels(attribute: Attribute, labels: &[String], config: &StyleConfig) -> Result<Vec<ColorTuple>, BarError> {
    labels
        .iter()
        .map(|s| {
            parse_color(s)
                .map(|spec| spec.to_tuple(&config.palette))
                .map_err(|e| BarError::resolution(attribute, format!("`{s}`: {}", e.message)))
        })
        .collect()
}

fn dashes_from_labels(attribute: Attribute, labels: &[String], config: &StyleConfig) -> Result<Vec<DashPattern>, BarError> {
    labels
        .iter()
        .map(|s| {
            parse_line_style(s)
                .map(|style| style.to_pattern(config))
                .map_err(|e| BarError::resolution(attribute, format!("`{s}`: {}", e.message)))
        })
        .collect()
}

impl Property for ColorSpec {
    type Output = ColorTuple;

    fn lookup(mark: &BarMark, attribute: Attribute) -> Option<&Mappable<Self>> {
        match attribute {
            Attribute::Color => Some(&mark.color),
            Attribute::EdgeColor => Some(&mark.edgecolor),
            _ => None,
        }
    }

    fn standardize(&self, config: &StyleConfig) -> ColorTuple {
        self.to_tuple(&config.palette)
    }

    fn from_rc(attribute: Attribute, param: RcParam, config: &StyleConfig) -> Result<ColorTuple, BarError> {
        match param {
            RcParam::PatchEdgeColor => Ok(config.patch_edgecolor),
            other => Err(BarError::resolution(attribute, format!("{other:?} is not a color"))),
        }
    }

    fn from_column(attribute: Attribute, column: &Column, config: &StyleConfig) -> Result<Vec<ColorTuple>, BarError> {
        match column {
            Column::Labels(labels) => colors_from_labels(attribute, labels, config),
            Column::Numbers(_) => Err(BarError::resolution(
                attribute,
                "numeric data needs a scale to become colors",
            )),
        }
    }

    fn from_mapped(attribute: Attribute, mapped: Mapped, config: &StyleConfig) -> Result<Vec<ColorTuple>, BarError> {
        match mapped {
            Mapped::Tuples(tuples) => tuples
                .iter()
                .map(|t| ColorTuple::from_components(t).map_err(|msg| BarError::resolution(attribute, msg)))
                .collect(),
            Mapped::Labels(labels) => colors_from_labels(attribute, &labels, config),
            other => Err(unexpected(attribute, &other)),
        }
    }
}

impl Property for f64 {
    type Output = f64;

    fn lookup(mark: &BarMark, attribute: Attribute) -> Option<&Mappable<Self>> {
        match attribute {
            Attribute::Alpha => Some(&mark.alpha),
            Attribute::EdgeAlpha => Some(&mark.edgealpha),
            Attribute::EdgeWidth => Some(&mark.edgewidth),
            _ => None,
        }
    }

    fn standardize(&self, _config: &StyleConfig) -> f64 {
        *self
    }

    fn from_rc(attribute: Attribute, param: RcParam, config: &StyleConfig) -> Result<f64, BarError> {
        match param {
            RcParam::PatchLineWidth => Ok(config.patch_linewidth.raw()),
            other => Err(BarError::resolution(attribute, format!("{other:?} is not a number"))),
        }
    }

    fn from_column(attribute: Attribute, column: &Column, _config: &StyleConfig) -> Result<Vec<f64>, BarError> {
        match column {
            Column::Numbers(v) => Ok(v.clone()),
            Column::Labels(_) => Err(BarError::resolution(attribute, "labels need a scale to become numbers")),
        }
    }

    fn from_mapped(attribute: Attribute, mapped: Mapped, _config: &StyleConfig) -> Result<Vec<f64>, BarError> {
        match mapped {
            Mapped::Numbers(v) => Ok(v),
            Mapped::Flags(v) => Ok(v.into_iter().map(f64::from).collect()),
            other => Err(unexpected(attribute, &other)),
        }
    }
}

/// Fill flags resolve to an opacity factor: 1 or 0, or anything in between
/// when a scale produces continuous values.
impl Property for bool {
    type Output = f64;

    fn lookup(mark: &BarMark, attribute: Attribute) -> Option<&Mappable<Self>> {
        match attribute {
            Attribute::Fill => Some(&mark.fill),
            _ => None,
        }
    }

    fn standardize(&self, _config: &StyleConfig) -> f64 {
        if *self { 1.0 } else { 0.0 }
    }

    fn from_column(attribute: Attribute, column: &Column, _config: &StyleConfig) -> Result<Vec<f64>, BarError> {
        match column {
            Column::Numbers(v) => Ok(v.clone()),
            Column::Labels(_) => Err(BarError::resolution(attribute, "labels need a scale to become fill flags")),
        }
    }

    fn from_mapped(attribute: Attribute, mapped: Mapped, _config: &StyleConfig) -> Result<Vec<f64>, BarError> {
        match mapped {
            Mapped::Flags(v) => Ok(v.into_iter().map(|b| if b { 1.0 } else { 0.0 }).collect()),
            Mapped::Numbers(v) => Ok(v),
            other => Err(unexpected(attribute, &other)),
        }
    }
}

impl Property for LineStyle {
    type Output = DashPattern;

    fn lookup(mark: &BarMark, attribute: Attribute) -> Option<&Mappable<Self>> {
        match attribute {
            Attribute::EdgeStyle => Some(&mark.edgestyle),
            _ => None,
        }
    }

    fn standardize(&self, config: &StyleConfig) -> DashPattern {
        self.to_pattern(config)
    }

    fn from_column(attribute: Attribute, column: &Column, config: &StyleConfig) -> Result<Vec<DashPattern>, BarError> {
        match column {
            Column::Labels(labels) => dashes_from_labels(attribute, labels, config),
            Column::Numbers(_) => Err(BarError::resolution(attribute, "numeric data needs a scale to become line styles")),
        }
    }

    fn from_mapped(attribute: Attribute, mapped: Mapped, config: &StyleConfig) -> Result<Vec<DashPattern>, BarError> {
        match mapped {
            Mapped::Dashes(v) => Ok(v),
            Mapped::Labels(labels) => dashes_from_labels(attribute, &labels, config),
            other => Err(unexpected(attribute, &other)),
        }
    }
}

// ============================================================================
// Resolved values
// ============================================================================

/// A resolved attribute: one broadcast value, or one value per row
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Uniform(T),
    PerRow(Vec<T>),
}

impl<T> Resolved<T> {
    /// Value for `row`; broadcast values answer for every row
    pub fn at(&self, row: usize) -> Option<&T> {
        match self {
            Resolved::Uniform(v) => Some(v),
            Resolved::PerRow(v) => v.get(row),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Resolved<U> {
        match self {
            Resolved::Uniform(v) => Resolved::Uniform(f(v)),
            Resolved::PerRow(v) => Resolved::PerRow(v.into_iter().map(f).collect()),
        }
    }

    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Resolved<U>, E> {
        Ok(match self {
            Resolved::Uniform(v) => Resolved::Uniform(f(v)?),
            Resolved::PerRow(v) => Resolved::PerRow(v.into_iter().map(f).collect::<Result<_, _>>()?),
        })
    }
}

impl<T: Clone> Resolved<T> {
    /// Combine row-wise, broadcasting a uniform side
    pub fn zip_with<U: Clone, V>(self, other: Resolved<U>, mut f: impl FnMut(T, U) -> V) -> Resolved<V> {
        match (self, other) {
            (Resolved::Uniform(a), Resolved::Uniform(b)) => Resolved::Uniform(f(a, b)),
            (Resolved::Uniform(a), Resolved::PerRow(b)) => {
                Resolved::PerRow(b.into_iter().map(|b| f(a.clone(), b)).collect())
            }
            (Resolved::PerRow(a), Resolved::Uniform(b)) => {
                Resolved::PerRow(a.into_iter().map(|a| f(a, b.clone())).collect())
            }
            (Resolved::PerRow(a), Resolved::PerRow(b)) => {
                Resolved::PerRow(a.into_iter().zip(b).map(|(a, b)| f(a, b)).collect())
            }
        }
    }
}

/// Fully computed visual attributes of one bar
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// Face color; alpha already multiplied by `fill`
    pub fill_color: Rgba,
    pub edge_color: Rgba,
    pub edge_width: Points,
    pub edge_style: DashPattern,
    /// Fill opacity factor (1 = filled, 0 = outline only)
    pub fill: f64,
}

/// Resolved attributes of a whole row table
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperties {
    pub fill_color: Resolved<Rgba>,
    pub edge_color: Resolved<Rgba>,
    pub edge_width: Resolved<Points>,
    pub edge_style: Resolved<DashPattern>,
    pub fill: Resolved<f64>,
}

impl ResolvedProperties {
    pub fn style(&self, row: usize) -> Option<ResolvedStyle> {
        Some(ResolvedStyle {
            fill_color: *self.fill_color.at(row)?,
            edge_color: *self.edge_color.at(row)?,
            edge_width: *self.edge_width.at(row)?,
            edge_style: self.edge_style.at(row)?.clone(),
            fill: *self.fill.at(row)?,
        })
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// How one attribute will be resolved for a given table
pub enum ResolutionMode<'r, P> {
    /// Directly specified on the mark
    Fixed(&'r P),
    /// The data has a column and a scale is registered for it
    ScaleMapped {
        attribute: Attribute,
        scale: &'r dyn Scale,
        column: &'r Column,
    },
    /// The data has a column but no scale: use raw values
    Identity { attribute: Attribute, column: &'r Column },
    /// Mark default
    Default(&'r P),
    /// Style-config default
    Rc(RcParam),
    /// Left for a later pass to compute
    AutoDeferred,
}

impl<P> fmt::Debug for ResolutionMode<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Fixed(_) => f.write_str("Fixed"),
            ResolutionMode::ScaleMapped { attribute, .. } => write!(f, "ScaleMapped({attribute})"),
            ResolutionMode::Identity { attribute, .. } => write!(f, "Identity({attribute})"),
            ResolutionMode::Default(_) => f.write_str("Default"),
            ResolutionMode::Rc(p) => write!(f, "Rc({p:?})"),
            ResolutionMode::AutoDeferred => f.write_str("AutoDeferred"),
        }
    }
}

pub struct PropertyResolver<'a> {
    mark: &'a BarMark,
    scales: &'a dyn ScaleRegistry,
    config: &'a StyleConfig,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(mark: &'a BarMark, scales: &'a dyn ScaleRegistry, config: &'a StyleConfig) -> Self {
        Self { mark, scales, config }
    }

    /// Resolve every style attribute for `data`
    pub fn resolve(&self, data: &RowTable) -> Result<ResolvedProperties, BarError> {
        let face = self.resolve_color(Attribute::Color, Attribute::Alpha, data)?;
        let edge_color = self.resolve_color(Attribute::EdgeColor, Attribute::EdgeAlpha, data)?;
        let fill = self.resolve_attr::<bool>(Attribute::Fill, data)?;
        let edge_width = self
            .resolve_attr::<f64>(Attribute::EdgeWidth, data)?
            .try_map(|w| {
                Points::try_non_negative(w)
                    .map_err(|e| BarError::resolution(Attribute::EdgeWidth, format!("{w}: {e}")))
            })?;
        let edge_style = self.resolve_attr::<LineStyle>(Attribute::EdgeStyle, data)?;

        // A disabled fill keeps the face (for hit-testing and legends) but
        // makes it fully transparent.
        let fill_color = face.zip_with(fill.clone(), |c, f| c.scale_alpha(f));

        Ok(ResolvedProperties { fill_color, edge_color, edge_width, edge_style, fill })
    }

    /// Choose how `attribute` resolves against `data`
    pub fn mode<'r, P: Property>(&'r self, attribute: Attribute, data: &'r RowTable) -> Result<ResolutionMode<'r, P>, BarError> {
        self.mode_at(attribute, data, 0)
    }

    fn mode_at<'r, P: Property>(
        &'r self,
        attribute: Attribute,
        data: &'r RowTable,
        depth: usize,
    ) -> Result<ResolutionMode<'r, P>, BarError> {
        if depth > MAX_DEPEND_DEPTH {
            return Err(BarError::resolution(attribute, "attribute dependencies form a cycle"));
        }
        let feature = P::lookup(self.mark, attribute)
            .ok_or_else(|| BarError::resolution(attribute, "attribute has a different value type"))?;

        if let Mappable::Value(v) = feature {
            return Ok(ResolutionMode::Fixed(v));
        }

        if let Some(column) = data.column(attribute.name()) {
            return Ok(match self.scales.resolve(attribute) {
                Some(scale) => ResolutionMode::ScaleMapped { attribute, scale, column },
                None => ResolutionMode::Identity { attribute, column },
            });
        }

        Ok(match feature {
            Mappable::Depend(other) => return self.mode_at(*other, data, depth + 1),
            Mappable::Default(v) | Mappable::Value(v) => ResolutionMode::Default(v),
            Mappable::Rc(param) => ResolutionMode::Rc(*param),
            Mappable::Auto => ResolutionMode::AutoDeferred,
        })
    }

    /// Run one resolution mode for a table of `rows` rows
    pub fn resolve_mode<P: Property>(
        &self,
        attribute: Attribute,
        mode: ResolutionMode<'_, P>,
        rows: usize,
    ) -> Result<Resolved<P::Output>, BarError> {
        match mode {
            ResolutionMode::Fixed(v) | ResolutionMode::Default(v) => {
                Ok(Resolved::Uniform(v.standardize(self.config)))
            }
            ResolutionMode::ScaleMapped { attribute, scale, column } => {
                let mapped = scale
                    .map(column)
                    .map_err(|source| BarError::Scaling { attribute, source })?;
                if mapped.len() != rows {
                    return Err(BarError::resolution(
                        attribute,
                        format!("scale returned {} values for {rows} rows", mapped.len()),
                    ));
                }
                Ok(Resolved::PerRow(P::from_mapped(attribute, mapped, self.config)?))
            }
            ResolutionMode::Identity { attribute, column } => {
                Ok(Resolved::PerRow(P::from_column(attribute, column, self.config)?))
            }
            ResolutionMode::Rc(param) => Ok(Resolved::Uniform(P::from_rc(attribute, param, self.config)?)),
            ResolutionMode::AutoDeferred if attribute == Attribute::EdgeWidth => {
                // Placeholder until the batch pass measures the bars
                Ok(Resolved::Uniform(P::from_rc(attribute, RcParam::PatchLineWidth, self.config)?))
            }
            ResolutionMode::AutoDeferred => Err(BarError::resolution(
                attribute,
                "automatic values are only supported for edge width",
            )),
        }
    }

    fn resolve_attr<P: Property>(&self, attribute: Attribute, data: &RowTable) -> Result<Resolved<P::Output>, BarError> {
        let mode = self.mode::<P>(attribute, data)?;
        self.resolve_mode(attribute, mode, data.len())
    }

    fn resolve_color(&self, color: Attribute, alpha: Attribute, data: &RowTable) -> Result<Resolved<Rgba>, BarError> {
        let tuples = self.resolve_attr::<ColorSpec>(color, data)?;
        let alpha = self.resolve_attr::<f64>(alpha, data)?;
        Ok(tuples.zip_with(alpha, ColorTuple::with_alpha))
    }
}

/// Resolve the style of a legend entry where every listed variable takes
/// `value`.
pub fn legend_swatch(
    mark: &BarMark,
    variables: &[Attribute],
    value: &Datum,
    scales: &dyn ScaleRegistry,
    config: &StyleConfig,
) -> Result<ResolvedStyle, BarError> {
    let mut key = RowTable::new();
    for variable in variables {
        key.insert(variable.name(), Column::repeat(value, 1))?;
    }
    let resolved = PropertyResolver::new(mark, scales, config).resolve(&key)?;
    resolved
        .style(0)
        .ok_or_else(|| BarError::contract("legend key resolved to no rows"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ScaleFailure, Scales};

    fn table(columns: Vec<(&str, Column)>) -> RowTable {
        RowTable::from_columns(columns).unwrap()
    }

    fn three_rows() -> RowTable {
        table(vec![("x", vec![0.0, 1.0, 2.0].into())])
    }

    #[test]
    fn defaults_resolve_uniformly() {
        let mark = BarMark::bar();
        let scales = Scales::new();
        let config = StyleConfig::default();
        let props = PropertyResolver::new(&mark, &scales, &config).resolve(&three_rows()).unwrap();

        let [r, g, b] = config.palette[0].rgb;
        assert_eq!(props.fill_color, Resolved::Uniform(Rgba::new(r, g, b, 0.7)));
        // Edge color follows the face color but with its own (opaque) alpha
        assert_eq!(props.edge_color, Resolved::Uniform(Rgba::new(r, g, b, 1.0)));
        assert_eq!(props.edge_width, Resolved::Uniform(config.patch_linewidth));
        assert_eq!(props.edge_style, Resolved::Uniform(DashPattern::SOLID));
    }

    #[test]
    fn fill_off_zeroes_alpha_uniform_and_per_row() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mark = BarMark::bar().with_fill(false).with_alpha(0.7);
        let props = PropertyResolver::new(&mark, &scales, &config).resolve(&three_rows()).unwrap();
        assert_eq!(props.fill_color.at(0).unwrap().a, 0.0);

        let data = table(vec![
            ("x", vec![0.0, 1.0, 2.0].into()),
            ("color", vec!["red", "#00ff00", "C3"].into()),
        ]);
        let props = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap();
        let Resolved::PerRow(colors) = &props.fill_color else {
            panic!("expected per-row colors, got {:?}", props.fill_color);
        };
        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|c| c.a == 0.0));
    }

    #[test]
    fn alpha_is_scaled_by_fill_per_row() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Fill, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Flags(vec![true, false, true]))
        });
        let data = table(vec![
            ("x", vec![0.0, 1.0, 2.0].into()),
            ("fill", vec!["a", "b", "a"].into()),
        ]);
        let mark = BarMark::bar();
        let props = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap();
        let alphas: Vec<f64> = (0..3).map(|i| props.fill_color.at(i).unwrap().a).collect();
        assert_eq!(alphas, vec![0.7, 0.0, 0.7]);
    }

    #[test]
    fn fixed_value_beats_data_column() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mark = BarMark::bar().with_edgewidth(3.0);
        let data = table(vec![
            ("x", vec![0.0, 1.0, 2.0].into()),
            ("edgewidth", vec![1.0, 2.0, 4.0].into()),
        ]);
        let resolver = PropertyResolver::new(&mark, &scales, &config);
        let mode = resolver.mode::<f64>(Attribute::EdgeWidth, &data).unwrap();
        assert!(matches!(mode, ResolutionMode::Fixed(_)));
        let props = resolver.resolve(&data).unwrap();
        assert_eq!(props.edge_width, Resolved::Uniform(Points(3.0)));
    }

    #[test]
    fn column_without_scale_is_identity() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mark = BarMark::bar();
        let data = table(vec![
            ("x", vec![0.0, 1.0].into()),
            ("edgestyle", vec!["--", "-"].into()),
        ]);
        let resolver = PropertyResolver::new(&mark, &scales, &config);
        let mode = resolver.mode::<LineStyle>(Attribute::EdgeStyle, &data).unwrap();
        assert_eq!(format!("{mode:?}"), "Identity(edgestyle)");
        let props = resolver.resolve(&data).unwrap();
        assert!(props.edge_style.at(0).unwrap().is_dashed());
        assert!(!props.edge_style.at(1).unwrap().is_dashed());
    }

    #[test]
    fn dependent_edgecolor_follows_mapped_color() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Color, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Tuples(vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0, 0.5]]))
        });
        let data = table(vec![
            ("x", vec![0.0, 1.0].into()),
            ("color", vec!["a", "b"].into()),
        ]);
        let mark = BarMark::bar();
        let resolver = PropertyResolver::new(&mark, &scales, &config);
        let mode = resolver.mode::<ColorSpec>(Attribute::EdgeColor, &data).unwrap();
        assert_eq!(format!("{mode:?}"), "ScaleMapped(color)");
        let props = resolver.resolve(&data).unwrap();
        assert_eq!(props.edge_color.at(0), Some(&Rgba::new(1.0, 0.0, 0.0, 1.0)));
        // Four-component colors keep their own alpha
        assert_eq!(props.edge_color.at(1), Some(&Rgba::new(0.0, 0.0, 1.0, 0.5)));
        assert_eq!(props.fill_color.at(1), Some(&Rgba::new(0.0, 0.0, 1.0, 0.5)));
    }

    #[test]
    fn malformed_mapped_color_fails() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Color, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Tuples(vec![vec![1.0, 0.0]]))
        });
        let data = table(vec![("color", vec!["a"].into())]);
        let mark = BarMark::bars();
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap_err();
        let BarError::PropertyResolution(err) = err else {
            panic!("expected a resolution error, got {err:?}");
        };
        assert_eq!(err.attribute, Attribute::Color);
    }

    #[test]
    fn numbers_are_not_colors() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Color, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Numbers(vec![0.5]))
        });
        let data = table(vec![("color", vec![3.0].into())]);
        let mark = BarMark::bars();
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap_err();
        assert!(matches!(err, BarError::PropertyResolution(_)));
    }

    #[test]
    fn scale_row_count_must_match() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Alpha, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Numbers(vec![0.5]))
        });
        let data = table(vec![("alpha", vec![1.0, 2.0].into())]);
        let mark = BarMark::bars();
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap_err();
        assert!(err.to_string().contains("scale returned 1 values for 2 rows"), "{err}");
    }

    #[test]
    fn scale_failure_is_wrapped() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Alpha, |_: &Column| -> Result<Mapped, ScaleFailure> {
            Err("domain is empty".into())
        });
        let data = table(vec![("alpha", vec![1.0].into())]);
        let mark = BarMark::bars();
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&data).unwrap_err();
        assert!(matches!(err, BarError::Scaling { attribute: Attribute::Alpha, .. }));
    }

    #[test]
    fn negative_edge_width_is_rejected() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mark = BarMark::bar().with_edgewidth(-1.0);
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&three_rows()).unwrap_err();
        assert!(matches!(err, BarError::PropertyResolution(_)));
    }

    #[test]
    fn auto_outside_edge_width_is_rejected() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mut mark = BarMark::bar();
        mark.alpha = Mappable::Auto;
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&three_rows()).unwrap_err();
        assert!(err.to_string().contains("only supported for edge width"), "{err}");
    }

    #[test]
    fn auto_edge_width_uses_config_placeholder() {
        let config = StyleConfig::default().with_patch_linewidth(Points(0.5));
        let scales = Scales::new();
        let mark = BarMark::bars();
        let resolver = PropertyResolver::new(&mark, &scales, &config);
        let data = three_rows();
        let mode = resolver.mode::<f64>(Attribute::EdgeWidth, &data).unwrap();
        assert!(matches!(mode, ResolutionMode::AutoDeferred));
        let props = resolver.resolve(&data).unwrap();
        assert_eq!(props.edge_width, Resolved::Uniform(Points(0.5)));
    }

    #[test]
    fn dependency_cycle_is_reported() {
        let config = StyleConfig::default();
        let scales = Scales::new();
        let mut mark = BarMark::bar();
        mark.color = Mappable::Depend(Attribute::EdgeColor);
        let err = PropertyResolver::new(&mark, &scales, &config).resolve(&three_rows()).unwrap_err();
        assert!(err.to_string().contains("cycle"), "{err}");
    }

    #[test]
    fn legend_swatch_resolves_single_key() {
        let config = StyleConfig::default();
        let scales = Scales::new().with(Attribute::Color, |values: &Column| -> Result<Mapped, ScaleFailure> {
            Ok(Mapped::Tuples(vec![vec![0.0, 0.5, 0.0]; values.len()]))
        });
        let mark = BarMark::bar();
        let swatch = legend_swatch(&mark, &[Attribute::Color], &Datum::from("a"), &scales, &config).unwrap();
        assert_eq!(swatch.fill_color, Rgba::new(0.0, 0.5, 0.0, 0.7));
        assert_eq!(swatch.edge_color, Rgba::new(0.0, 0.5, 0.0, 1.0));
        assert_eq!(swatch.edge_width, config.patch_linewidth);
    }

    #[test]
    fn attribute_names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.name().parse::<Attribute>().unwrap(), attribute);
        }
        assert!("pattern".parse::<Attribute>().is_err());
    }
}
