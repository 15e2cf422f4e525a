//! The scale collaborator: maps raw column values to visual values

use std::collections::BTreeMap;

use crate::data::Column;
use crate::linestyle::DashPattern;
use crate::properties::Attribute;

/// Failure reported by a scale; wrapped into [`crate::BarError::Scaling`]
pub type ScaleFailure = Box<dyn std::error::Error + Send + Sync>;

/// Output of a scale, one entry per input row
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Numbers(Vec<f64>),
    Flags(Vec<bool>),
    /// Numeric tuples, e.g. RGB(A) colors
    Tuples(Vec<Vec<f64>>),
    /// Style strings (color names, line-style names)
    Labels(Vec<String>),
    Dashes(Vec<DashPattern>),
}

impl Mapped {
    pub fn len(&self) -> usize {
        match self {
            Mapped::Numbers(v) => v.len(),
            Mapped::Flags(v) => v.len(),
            Mapped::Tuples(v) => v.len(),
            Mapped::Labels(v) => v.len(),
            Mapped::Dashes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Mapped::Numbers(_) => "numbers",
            Mapped::Flags(_) => "flags",
            Mapped::Tuples(_) => "tuples",
            Mapped::Labels(_) => "labels",
            Mapped::Dashes(_) => "dash patterns",
        }
    }
}

/// Maps a column of raw values, preserving row order and count
pub trait Scale {
    fn map(&self, values: &Column) -> Result<Mapped, ScaleFailure>;
}

impl<F> Scale for F
where
    F: Fn(&Column) -> Result<Mapped, ScaleFailure>,
{
    fn map(&self, values: &Column) -> Result<Mapped, ScaleFailure> {
        self(values)
    }
}

/// Looks up the scale (if any) registered for an attribute
pub trait ScaleRegistry {
    fn resolve(&self, attribute: Attribute) -> Option<&dyn Scale>;
}

/// Owned set of scales keyed by attribute
#[derive(Default)]
pub struct Scales {
    scales: BTreeMap<Attribute, Box<dyn Scale>>,
}

impl Scales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: Attribute, scale: impl Scale + 'static) {
        self.scales.insert(attribute, Box::new(scale));
    }

    pub fn with(mut self, attribute: Attribute, scale: impl Scale + 'static) -> Self {
        self.insert(attribute, scale);
        self
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.scales.contains_key(&attribute)
    }
}

impl ScaleRegistry for Scales {
    fn resolve(&self, attribute: Attribute) -> Option<&dyn Scale> {
        self.scales.get(&attribute).map(|s| s.as_ref())
    }
}

impl std::fmt::Debug for Scales {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.scales.keys()).finish()
    }
}
