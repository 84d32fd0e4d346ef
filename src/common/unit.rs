//! Length units used by style values.
//!
//! Style attributes carry lengths such as `0.5in` or `2.5cm`. Downstream
//! writers work in millimetres, so every length can be converted to `mm`.

use crate::common::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Unit of a length measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Millimeter
    Millimeter,
    /// Centimeter
    Centimeter,
    /// Meter
    Meter,
    /// Point (1/72 inch)
    Point,
    /// Pica (1/6 inch)
    Pica,
    /// Inch
    Inch,
    /// Pixel
    Pixel,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Inch => "in",
            Self::Pixel => "px",
        }
    }

    fn from_str_internal(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Self::Millimeter),
            "cm" => Some(Self::Centimeter),
            "m" => Some(Self::Meter),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            "in" | "inch" => Some(Self::Inch),
            "px" => Some(Self::Pixel),
            _ => None,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_internal(s)
            .ok_or_else(|| Error::InvalidValue(format!("Unknown length unit '{}'", s)))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length value with unit.
///
/// # Examples
///
/// ```
/// use quire::common::unit::{Length, LengthUnit};
///
/// let length = "0.5in".parse::<Length>().unwrap();
/// assert_eq!(length.unit(), LengthUnit::Inch);
/// assert!((length.to_millimeters().unwrap() - 12.7).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    /// Create a new length measurement
    #[inline]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Get the numeric value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the unit
    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Convert to millimetres.
    ///
    /// Pixels have no physical size without a resolution and are rejected.
    pub fn to_millimeters(&self) -> Result<f64> {
        let mm = match self.unit {
            LengthUnit::Millimeter => self.value,
            LengthUnit::Centimeter => self.value * 10.0,
            LengthUnit::Meter => self.value * 1000.0,
            LengthUnit::Inch => self.value * 25.4,
            LengthUnit::Point => self.value / 72.0 * 25.4,
            LengthUnit::Pica => self.value / 6.0 * 25.4,
            LengthUnit::Pixel => {
                return Err(Error::InvalidValue(
                    "Cannot convert pixels to millimeters without DPI information".to_string(),
                ));
            },
        };
        Ok(mm)
    }
}

impl FromStr for Length {
    type Err = Error;

    /// Parse length from string (e.g., "2.5cm", "10pt")
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (value, consumed) = fast_float2::parse_partial::<f64, _>(trimmed)
            .map_err(|_| Error::InvalidValue(format!("No numeric value found in '{}'", s)))?;

        let unit_str = trimmed[consumed..].trim();
        let unit = if unit_str.is_empty() {
            LengthUnit::Point
        } else {
            LengthUnit::from_str(unit_str)?
        };

        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}
