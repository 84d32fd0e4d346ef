//! Typed parsing of style attribute values.
//!
//! Style properties arrive as strings (`0.5in`, `115%`, `true`, `italic`).
//! Each semantic key declares the shape it expects; the value is parsed into
//! that shape once, at registration time, and the raw text is kept alongside
//! so writers can always fall back to it.
//!
//! # References
//!
//! - ODF 1.2 Specification: Attribute types and valid values
use crate::common::{Error, Length, Result};
use fast_float2::parse_partial;
use std::fmt;

/// Shape a style attribute is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    /// Length with unit (e.g., "2.5cm", "10pt")
    Length,
    /// Length, or percentage of the inherited value (e.g., "115%")
    LengthOrPercent,
    /// Boolean attribute (true/false)
    Boolean,
    /// Value from a small closed vocabulary (e.g., "bold", "italic")
    Keyword,
    /// Free text (names, language codes)
    Text,
}

/// Parsed form of a style attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Length(Length),
    /// Fraction, 1.0 for "100%"
    Percent(f64),
    Bool(bool),
    Keyword,
    Text,
}

/// A style attribute value: the raw text plus its typed reading.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleValue {
    raw: String,
    kind: ValueKind,
}

impl StyleValue {
    /// Parse `raw` as `attr_type`.
    ///
    /// A value that does not fit its declared shape is kept as text; the
    /// cascade must not lose data the writer might still understand.
    pub fn parse(raw: &str, attr_type: AttrType) -> Self {
        let parsed = match attr_type {
            AttrType::Length => parse_length(raw).map(ValueKind::Length),
            AttrType::LengthOrPercent if raw.trim_end().ends_with('%') => {
                parse_percentage(raw).map(ValueKind::Percent)
            },
            AttrType::LengthOrPercent => parse_length(raw).map(ValueKind::Length),
            AttrType::Boolean => parse_bool(raw).map(ValueKind::Bool),
            AttrType::Keyword => Ok(ValueKind::Keyword),
            AttrType::Text => Ok(ValueKind::Text),
        };
        let kind = parsed.unwrap_or_else(|e| {
            log::debug!("keeping style value as text: {}", e);
            ValueKind::Text
        });
        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    /// The value exactly as written in the document.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The value as a length, if it is one.
    #[inline]
    pub fn as_length(&self) -> Option<Length> {
        match self.kind {
            ValueKind::Length(length) => Some(length),
            _ => None,
        }
    }

    /// The value as a fraction, if it is a percentage.
    #[inline]
    pub fn as_percent(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Percent(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The value in millimetres, if it is a physical length.
    pub fn to_millimeters(&self) -> Option<f64> {
        self.as_length().and_then(|l| l.to_millimeters().ok())
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a boolean attribute value
///
/// ODF uses "true"/"false" for boolean values.
///
/// # Examples
///
/// ```
/// # use quire::odf::elements::attr_parser::parse_bool;
/// assert_eq!(parse_bool("true").unwrap(), true);
/// assert_eq!(parse_bool("false").unwrap(), false);
/// assert!(parse_bool("yes").is_err());
/// ```
#[inline]
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::InvalidValue(format!("Invalid boolean value: {}", other))),
    }
}

/// Parse a length attribute with unit (e.g., "2.5cm", "10pt")
///
/// # Examples
///
/// ```
/// # use quire::odf::elements::attr_parser::parse_length;
/// # use quire::common::LengthUnit;
/// let length = parse_length("2.5cm").unwrap();
/// assert!((length.value() - 2.5).abs() < 0.0001);
/// assert_eq!(length.unit(), LengthUnit::Centimeter);
/// ```
#[inline]
pub fn parse_length(value: &str) -> Result<Length> {
    value.parse::<Length>()
}

/// Parse a percentage attribute (e.g., "50%")
///
/// Returns the percentage as a fraction (e.g., 0.5 for "50%").
///
/// # Examples
///
/// ```
/// # use quire::odf::elements::attr_parser::parse_percentage;
/// assert!((parse_percentage("115%").unwrap() - 1.15).abs() < 1e-9);
/// ```
#[inline]
pub fn parse_percentage(value: &str) -> Result<f64> {
    let trimmed = value.trim().trim_end_matches('%').trim();
    match parse_partial::<f64, _>(trimmed) {
        Ok((num, consumed)) if consumed == trimmed.len() => Ok(num / 100.0),
        _ => Err(Error::InvalidValue(format!("Invalid percentage value: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::LengthUnit;

    #[test]
    fn test_typed_values() {
        let v = StyleValue::parse("0.5in", AttrType::Length);
        assert_eq!(v.as_length().map(|l| l.unit()), Some(LengthUnit::Inch));
        assert!((v.to_millimeters().unwrap() - 12.7).abs() < 1e-9);
        assert_eq!(v.raw(), "0.5in");

        let v = StyleValue::parse("115%", AttrType::LengthOrPercent);
        assert!((v.as_percent().unwrap() - 1.15).abs() < 1e-9);
        assert_eq!(v.to_millimeters(), None);

        let v = StyleValue::parse("0.2cm", AttrType::LengthOrPercent);
        assert!((v.to_millimeters().unwrap() - 2.0).abs() < 1e-9);

        let v = StyleValue::parse("false", AttrType::Boolean);
        assert_eq!(v.as_bool(), Some(false));
    }

    #[test]
    fn test_ill_typed_value_kept_as_text() {
        let v = StyleValue::parse("normal", AttrType::LengthOrPercent);
        assert_eq!(v.kind(), &ValueKind::Text);
        assert_eq!(v.to_string(), "normal");

        let v = StyleValue::parse("maybe", AttrType::Boolean);
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.raw(), "maybe");
    }

    #[test]
    fn test_percentage_rejects_garbage() {
        assert!(parse_percentage("12x%").is_err());
        assert!(parse_percentage("%").is_err());
    }
}
