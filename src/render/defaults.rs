//! Default style settings (stroke quantities in points)

use crate::types::Points;

/// Default patch edge width
pub const PATCH_LINEWIDTH: Points = Points(1.0);
/// Dash patterns for the named line styles, in points
pub const DASHED_PATTERN: [f64; 2] = [3.7, 1.6];
pub const DASHDOT_PATTERN: [f64; 4] = [6.4, 1.6, 1.0, 1.6];
pub const DOTTED_PATTERN: [f64; 2] = [1.0, 1.65];

/// Fraction of the narrowest bar (in points) used as the automatic edge width
pub const AUTO_EDGE_FRACTION: f64 = 0.1;

/// Reference surface: relative autoscale padding on each side
pub const AXES_MARGIN: f64 = 0.05;
/// Reference surface: resolution in dots per inch
pub const DPI: f64 = 100.0;
