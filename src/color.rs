//! Color values at the three stages they pass through: authored
//! ([`ColorSpec`]), resolved but not yet alpha-composited ([`ColorTuple`]),
//! and final ([`Rgba`]).

use std::fmt;
use std::str::FromStr;

use crate::errors::StyleParseError;

/// Final RGBA color, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel multiplied by `factor`
    pub fn scale_alpha(self, factor: f64) -> Self {
        Self { a: self.a * factor, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({:.3},{:.3},{:.3},{:.3})", self.r, self.g, self.b, self.a)
    }
}

/// A color whose alpha may still come from a separate alpha attribute.
///
/// Four-component colors carry their own alpha, which wins over the
/// attribute; three-component colors take whatever the attribute says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTuple {
    pub rgb: [f64; 3],
    pub alpha: Option<f64>,
}

impl ColorTuple {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { rgb: [r, g, b], alpha: None }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { rgb: [r, g, b], alpha: Some(a) }
    }

    /// The color `none`: fully transparent regardless of any alpha setting
    pub const NONE: ColorTuple = ColorTuple::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build from a 3- or 4-component numeric tuple.
    ///
    /// Non-finite components are accepted here (they mark an invisible
    /// color); finite components must lie in `[0, 1]`.
    pub fn from_components(components: &[f64]) -> Result<Self, String> {
        let (rgb, alpha) = match components {
            [r, g, b] => ([*r, *g, *b], None),
            [r, g, b, a] => ([*r, *g, *b], Some(*a)),
            other => {
                return Err(format!(
                    "expected a 3- or 4-component color tuple, got {} components",
                    other.len()
                ));
            }
        };
        if components.iter().any(|c| c.is_finite() && !(0.0..=1.0).contains(c)) {
            return Err(format!("color components must be within 0-1, got {components:?}"));
        }
        Ok(Self { rgb, alpha })
    }

    /// True when every component is a finite number
    pub fn is_visible(&self) -> bool {
        self.rgb.iter().all(|c| c.is_finite()) && self.alpha.is_none_or(f64::is_finite)
    }

    /// Composite with the alpha attribute to get the final color
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        if !self.is_visible() {
            return Rgba::TRANSPARENT;
        }
        let [r, g, b] = self.rgb;
        Rgba::new(r, g, b, self.alpha.unwrap_or(alpha))
    }
}

/// An authored color, before the palette is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    /// `C<n>`: the n-th entry of the configured color cycle
    Cycle(usize),
    /// A concrete color
    Tuple(ColorTuple),
}

impl ColorSpec {
    /// Resolve against a palette; cycle indices wrap around.
    pub fn to_tuple(self, palette: &[ColorTuple]) -> ColorTuple {
        match self {
            ColorSpec::Tuple(t) => t,
            ColorSpec::Cycle(_) if palette.is_empty() => ColorTuple::NONE,
            ColorSpec::Cycle(n) => palette[n % palette.len()],
        }
    }
}

impl FromStr for ColorSpec {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_color(s)
    }
}

impl From<ColorTuple> for ColorSpec {
    fn from(t: ColorTuple) -> Self {
        ColorSpec::Tuple(t)
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        ColorSpec::Tuple(ColorTuple::rgba(c.r, c.g, c.b, c.a))
    }
}

const fn hex(rgb: u32) -> ColorTuple {
    ColorTuple::rgb(
        ((rgb >> 16) & 0xFF) as f64 / 255.0,
        ((rgb >> 8) & 0xFF) as f64 / 255.0,
        (rgb & 0xFF) as f64 / 255.0,
    )
}

/// The ten-color "tab10" cycle
pub const TAB10: [ColorTuple; 10] = [
    hex(0x1f77b4),
    hex(0xff7f0e),
    hex(0x2ca02c),
    hex(0xd62728),
    hex(0x9467bd),
    hex(0x8c564b),
    hex(0xe377c2),
    hex(0x7f7f7f),
    hex(0xbcbd22),
    hex(0x17becf),
];

/// Look up a named color (single-letter base colors, `tab:` names, and a
/// handful of CSS names).
pub fn named_color(name: &str) -> Option<ColorTuple> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "b" => return Some(ColorTuple::rgb(0.0, 0.0, 1.0)),
        "g" => return Some(ColorTuple::rgb(0.0, 0.5, 0.0)),
        "r" => return Some(ColorTuple::rgb(1.0, 0.0, 0.0)),
        "c" => return Some(ColorTuple::rgb(0.0, 0.75, 0.75)),
        "m" => return Some(ColorTuple::rgb(0.75, 0.0, 0.75)),
        "y" => return Some(ColorTuple::rgb(0.75, 0.75, 0.0)),
        "k" => return Some(ColorTuple::rgb(0.0, 0.0, 0.0)),
        "w" => return Some(ColorTuple::rgb(1.0, 1.0, 1.0)),
        "tab:blue" => return Some(TAB10[0]),
        "tab:orange" => return Some(TAB10[1]),
        "tab:green" => return Some(TAB10[2]),
        "tab:red" => return Some(TAB10[3]),
        "tab:purple" => return Some(TAB10[4]),
        "tab:brown" => return Some(TAB10[5]),
        "tab:pink" => return Some(TAB10[6]),
        "tab:gray" | "tab:grey" => return Some(TAB10[7]),
        "tab:olive" => return Some(TAB10[8]),
        "tab:cyan" => return Some(TAB10[9]),
        "black" => 0x000000,
        "white" => 0xffffff,
        "red" => 0xff0000,
        "green" => 0x008000,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "cyan" | "aqua" => 0x00ffff,
        "magenta" | "fuchsia" => 0xff00ff,
        "orange" => 0xffa500,
        "purple" => 0x800080,
        "brown" => 0xa52a2a,
        "pink" => 0xffc0cb,
        "gray" | "grey" => 0x808080,
        "lightgray" | "lightgrey" => 0xd3d3d3,
        "darkgray" | "darkgrey" => 0xa9a9a9,
        "silver" => 0xc0c0c0,
        "navy" => 0x000080,
        "teal" => 0x008080,
        "olive" => 0x808000,
        "maroon" => 0x800000,
        "steelblue" => 0x4682b4,
        "firebrick" => 0xb22222,
        "seagreen" => 0x2e8b57,
        _ => return None,
    };
    Some(hex(rgb))
}
