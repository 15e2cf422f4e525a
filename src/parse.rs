//! Parse pest pairs into authored style values

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::color::{ColorSpec, ColorTuple, named_color};
use crate::errors::StyleParseError;
use crate::linestyle::{DashPattern, LineStyle};
use crate::{Rule, StyleParser};

const COLOR: &str = "color";
const LINE_STYLE: &str = "line style";

/// Parse an authored color string (`C0`, `#1f77b4`, `(0.1, 0.2, 0.3)`, `0.5`, `red`, ...)
pub fn parse_color(input: &str) -> Result<ColorSpec, StyleParseError> {
    let pairs = StyleParser::parse(Rule::color_spec, input)
        .map_err(|e| from_pest(COLOR, input, e))?;

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::none => return Ok(ColorSpec::Tuple(ColorTuple::NONE)),
            Rule::cycle => return parse_cycle(input, pair),
            Rule::hex => return parse_hex(input, pair).map(ColorSpec::Tuple),
            Rule::tuple => {
                let components = numbers(input, COLOR, pair.clone())?;
                return ColorTuple::from_components(&components)
                    .map(ColorSpec::Tuple)
                    .map_err(|msg| at_pair(COLOR, input, &pair, msg));
            }
            Rule::gray => {
                let level = number(input, COLOR, &pair)?;
                if !(0.0..=1.0).contains(&level) {
                    return Err(at_pair(COLOR, input, &pair, "gray level must be within 0-1"));
                }
                return Ok(ColorSpec::Tuple(ColorTuple::rgb(level, level, level)));
            }
            Rule::named => {
                return named_color(pair.as_str())
                    .map(ColorSpec::Tuple)
                    .ok_or_else(|| at_pair(COLOR, input, &pair, "unknown color name"));
            }
            _ => {}
        }
    }

    Err(StyleParseError::new(COLOR, input, "empty color", 0))
}

/// Parse an authored line style (`-`, `--`, `dashdot`, `(0, (3, 1))`, ...)
pub fn parse_line_style(input: &str) -> Result<LineStyle, StyleParseError> {
    let pairs = StyleParser::parse(Rule::dash_spec, input)
        .map_err(|e| from_pest(LINE_STYLE, input, e))?;

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::dash_name => {
                return Ok(match pair.as_str() {
                    "-" | "solid" => LineStyle::Solid,
                    "--" | "dashed" => LineStyle::Dashed,
                    "-." | "dashdot" => LineStyle::DashDot,
                    ":" | "dotted" => LineStyle::Dotted,
                    _ => LineStyle::Solid, // none / None: no dashes
                });
            }
            Rule::offset_dash => {
                let mut inner = pair.into_inner();
                let (Some(offset), Some(rest)) = (inner.next(), inner.next()) else {
                    return Err(StyleParseError::new(LINE_STYLE, input, "incomplete dash tuple", 0));
                };
                let offset = number(input, LINE_STYLE, &offset)?;
                let dashes = match rest.as_rule() {
                    Rule::dash_seq => Some(dash_lengths(input, rest)?),
                    _ => None,
                };
                return Ok(LineStyle::Custom(DashPattern::new(offset, dashes)));
            }
            Rule::dash_seq => {
                let dashes = dash_lengths(input, pair)?;
                return Ok(LineStyle::Custom(DashPattern::new(0.0, Some(dashes))));
            }
            _ => {}
        }
    }

    Err(StyleParseError::new(LINE_STYLE, input, "empty line style", 0))
}

fn parse_cycle(input: &str, pair: Pair<Rule>) -> Result<ColorSpec, StyleParseError> {
    pair.as_str()[1..]
        .parse::<usize>()
        .map(ColorSpec::Cycle)
        .map_err(|e| at_pair(COLOR, input, &pair, format!("invalid cycle index: {e}")))
}

fn parse_hex(input: &str, pair: Pair<Rule>) -> Result<ColorTuple, StyleParseError> {
    let digits = &pair.as_str()[1..];
    // Expand short forms: #abc -> #aabbcc, #abcd -> #aabbccdd
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        n => {
            return Err(at_pair(COLOR, input, &pair, format!("hex colors need 3, 4, 6 or 8 digits, got {n}")));
        }
    };
    let mut components = Vec::with_capacity(4);
    for i in (0..expanded.len()).step_by(2) {
        let byte = u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|e| at_pair(COLOR, input, &pair, format!("invalid hex digit: {e}")))?;
        components.push(byte as f64 / 255.0);
    }
    ColorTuple::from_components(&components).map_err(|msg| at_pair(COLOR, input, &pair, msg))
}

fn dash_lengths(input: &str, pair: Pair<Rule>) -> Result<Vec<f64>, StyleParseError> {
    let span = pair.clone();
    let dashes = numbers(input, LINE_STYLE, pair)?;
    if dashes.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(at_pair(LINE_STYLE, input, &span, "dash lengths must be finite and non-negative"));
    }
    Ok(dashes)
}

fn numbers(input: &str, kind: &'static str, pair: Pair<Rule>) -> Result<Vec<f64>, StyleParseError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| number(input, kind, &p))
        .collect()
}

fn number(input: &str, kind: &'static str, pair: &Pair<Rule>) -> Result<f64, StyleParseError> {
    pair.as_str()
        .trim()
        .parse::<f64>()
        .map_err(|e| at_pair(kind, input, pair, format!("invalid number: {e}")))
}

fn at_pair(kind: &'static str, input: &str, pair: &Pair<Rule>, message: impl Into<String>) -> StyleParseError {
    let span = pair.as_span();
    StyleParseError::new(kind, input, message, (span.start(), span.end() - span.start()))
}

fn from_pest(kind: &'static str, input: &str, e: pest::error::Error<Rule>) -> StyleParseError {
    let span = match e.location {
        InputLocation::Pos(p) => (p, 0),
        InputLocation::Span((start, end)) => (start, end - start),
    };
    let message = e.variant.message().to_string();
    StyleParseError::new(kind, input, message, span)
}
