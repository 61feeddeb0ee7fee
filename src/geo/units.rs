//! Distance values with unit suffixes ("50km", "10mi", "1200").

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GeoSearchError, Result};

lazy_static! {
    static ref DISTANCE_PATTERN: Regex =
        Regex::new(r"^\s*([0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*([a-zA-Z]*)\s*$").unwrap();
}

/// Units accepted in distance strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Inches,
    Feet,
    Yards,
    Miles,
    NauticalMiles,
}

impl DistanceUnit {
    /// Meters per one of this unit.
    pub fn meters(&self) -> f64 {
        match self {
            DistanceUnit::Millimeters => 0.001,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Inches => 0.0254,
            DistanceUnit::Feet => 0.3048,
            DistanceUnit::Yards => 0.9144,
            DistanceUnit::Miles => 1609.344,
            DistanceUnit::NauticalMiles => 1852.0,
        }
    }

    /// Short suffix used when formatting.
    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Inches => "in",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Miles => "mi",
            DistanceUnit::NauticalMiles => "nm",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        let unit = match suffix.to_ascii_lowercase().as_str() {
            "" | "m" | "meters" => DistanceUnit::Meters,
            "mm" | "millimeters" => DistanceUnit::Millimeters,
            "cm" | "centimeters" => DistanceUnit::Centimeters,
            "km" | "kilometers" => DistanceUnit::Kilometers,
            "in" | "inch" => DistanceUnit::Inches,
            "ft" | "feet" => DistanceUnit::Feet,
            "yd" | "yards" => DistanceUnit::Yards,
            "mi" | "miles" => DistanceUnit::Miles,
            "nm" | "nauticalmiles" => DistanceUnit::NauticalMiles,
            _ => return None,
        };
        Some(unit)
    }
}

/// A distance expressed in some unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Distance { value, unit }
    }

    /// Parse a distance string. A bare number is taken as meters.
    pub fn parse(input: &str) -> Result<Self> {
        let captures = DISTANCE_PATTERN
            .captures(input)
            .ok_or_else(|| GeoSearchError::parse(format!("invalid distance: '{input}'")))?;

        let value: f64 = captures[1]
            .parse()
            .map_err(|e| GeoSearchError::parse(format!("invalid distance '{input}': {e}")))?;
        let unit = DistanceUnit::from_suffix(&captures[2]).ok_or_else(|| {
            GeoSearchError::parse(format!("unknown distance unit '{}'", &captures[2]))
        })?;

        Ok(Distance { value, unit })
    }

    /// The distance in meters.
    pub fn to_meters(&self) -> f64 {
        self.value * self.unit.meters()
    }
}

impl FromStr for Distance {
    type Err = GeoSearchError;

    fn from_str(s: &str) -> Result<Self> {
        Distance::parse(s)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        let cases = [
            ("50km", 50_000.0),
            ("1200", 1200.0),
            ("1200m", 1200.0),
            ("2.5 mi", 4023.36),
            ("10nm", 18_520.0),
            ("3ft", 0.9144),
            ("100cm", 1.0),
            ("5000mm", 5.0),
            ("1e3m", 1000.0),
            ("1 Kilometers", 1000.0),
        ];
        for (input, meters) in cases {
            let parsed = Distance::parse(input).unwrap();
            assert!(
                (parsed.to_meters() - meters).abs() < 1e-9,
                "{input} parsed to {} m",
                parsed.to_meters()
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Distance::parse("").is_err());
        assert!(Distance::parse("km").is_err());
        assert!(Distance::parse("12 parsecs").is_err());
        assert!(Distance::parse("-5km").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let distance: Distance = "12.5km".parse().unwrap();
        assert_eq!(distance.to_string(), "12.5km");
        assert_eq!(distance.unit, DistanceUnit::Kilometers);
    }
}
