//! Error types with rich diagnostics using miette
//!
//! Style strings carry source spans so a bad color or dash spec points at
//! the offending character.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::properties::Attribute;
use crate::scale::ScaleFailure;

// ============================================================================
// Parse Errors
// ============================================================================

/// An authored color or line-style string that does not parse
#[derive(Error, Diagnostic, Debug)]
#[error("invalid {kind}: {message}")]
#[diagnostic(code(barmark::parse::invalid_style))]
pub struct StyleParseError {
    /// What was being parsed ("color" or "line style")
    pub kind: &'static str,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("not understood")]
    pub span: SourceSpan,
}

impl StyleParseError {
    pub(crate) fn new(
        kind: &'static str,
        input: &str,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            src: NamedSource::new(kind, input.to_string()),
            span: span.into(),
        }
    }
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// A style attribute resolved to something that cannot be drawn
#[derive(Error, Diagnostic, Debug)]
#[error("cannot resolve `{attribute}`: {reason}")]
#[diagnostic(code(barmark::resolve::property))]
pub struct PropertyResolutionError {
    pub attribute: Attribute,
    pub reason: String,
}

impl PropertyResolutionError {
    pub fn new(attribute: Attribute, reason: impl Into<String>) -> Self {
        Self {
            attribute,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Contract Errors
// ============================================================================

/// Input that breaks the engine's contract with its collaborators.
///
/// Raised before any geometry for the offending split is computed.
#[derive(Error, Diagnostic, Debug)]
#[error("contract violation: {message}")]
#[diagnostic(code(barmark::contract::violation))]
pub struct ContractViolationError {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

impl ContractViolationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// Umbrella
// ============================================================================

/// Any failure of a render pass
#[derive(Error, Diagnostic, Debug)]
pub enum BarError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] StyleParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PropertyResolution(#[from] PropertyResolutionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ContractViolation(#[from] ContractViolationError),

    #[error("scaling operation failed for `{attribute}`")]
    #[diagnostic(code(barmark::resolve::scaling))]
    Scaling {
        attribute: Attribute,
        #[source]
        source: ScaleFailure,
    },
}

impl BarError {
    pub(crate) fn resolution(attribute: Attribute, reason: impl Into<String>) -> Self {
        PropertyResolutionError::new(attribute, reason).into()
    }

    pub(crate) fn contract(message: impl Into<String>) -> Self {
        ContractViolationError::new(message).into()
    }
}
