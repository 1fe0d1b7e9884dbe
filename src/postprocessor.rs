//! Postprocessor identifiers.
//!
//! This module defines the [`Postprocessor`] enum, which selects how command
//! lines are matched and how their numbers are encoded. The identifier is an
//! open set: `rapid` is the primary target, anything else falls back to the
//! generic rules without validation.
//!
//! # Rules Overview
//!
//! | Postprocessor | Extruder scale | `SetRPM` / `M_RunCode` spacing |
//! |---------------|---------------:|--------------------------------|
//! | `rapid` | 1 / 100000 | digits glued to the keyword |
//! | anything else | 1 | one or more whitespace characters |
//!
//! # Example
//!
//! ```
//! use rapid_socket::Postprocessor;
//!
//! let pp: Postprocessor = "rapid".parse().unwrap();
//! assert!(pp.is_rapid());
//! assert_eq!(pp.extruder_divisor(), 100_000.0);
//!
//! let other = Postprocessor::from("klipper");
//! assert!(!other.is_rapid());
//! assert_eq!(other.to_string(), "klipper");
//! ```

use std::convert::Infallible;
use std::str::FromStr;

/// Identifier of the primary postprocessor.
pub const RAPID: &str = "rapid";

/// Divisor applied to extruder values under the `rapid` postprocessor.
pub const RAPID_EXTRUDER_DIVISOR: f64 = 100_000.0;

/// Target environment that the rewritten program is generated for.
///
/// Comparison against `rapid` is exact and case-sensitive; `"RAPID"` is an
/// unrecognized identifier and gets the generic rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Postprocessor {
    /// RoboDK's ABB RAPID output.
    #[default]
    Rapid,
    /// Any other identifier, kept verbatim.
    Other(String),
}

impl Postprocessor {
    /// Returns whether this is the primary `rapid` postprocessor.
    pub fn is_rapid(&self) -> bool {
        matches!(self, Postprocessor::Rapid)
    }

    /// Returns the divisor applied to extruder values.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::Postprocessor;
    ///
    /// assert_eq!(Postprocessor::Rapid.extruder_divisor(), 100_000.0);
    /// assert_eq!(Postprocessor::from("klipper").extruder_divisor(), 1.0);
    /// ```
    pub fn extruder_divisor(&self) -> f64 {
        match self {
            Postprocessor::Rapid => RAPID_EXTRUDER_DIVISOR,
            Postprocessor::Other(_) => 1.0,
        }
    }

    /// Returns whether `SetRPM` and `M_RunCode` take their digits directly
    /// after the keyword (`SetRPM1500`) rather than after whitespace.
    pub(crate) fn glues_digits(&self) -> bool {
        self.is_rapid()
    }

    /// Returns the identifier as written on the command line.
    pub fn as_str(&self) -> &str {
        match self {
            Postprocessor::Rapid => RAPID,
            Postprocessor::Other(name) => name,
        }
    }
}

impl From<&str> for Postprocessor {
    fn from(value: &str) -> Self {
        if value == RAPID {
            Postprocessor::Rapid
        } else {
            Postprocessor::Other(value.to_string())
        }
    }
}

impl From<String> for Postprocessor {
    fn from(value: String) -> Self {
        if value == RAPID {
            Postprocessor::Rapid
        } else {
            Postprocessor::Other(value)
        }
    }
}

impl From<Postprocessor> for String {
    fn from(value: Postprocessor) -> Self {
        match value {
            Postprocessor::Rapid => RAPID.to_string(),
            Postprocessor::Other(name) => name,
        }
    }
}

impl FromStr for Postprocessor {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Postprocessor::from(s))
    }
}

impl std::fmt::Display for Postprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rapid() {
        assert_eq!(Postprocessor::from("rapid"), Postprocessor::Rapid);
        assert_eq!("rapid".parse::<Postprocessor>().unwrap(), Postprocessor::Rapid);
    }

    #[test]
    fn test_unrecognized_is_kept() {
        let pp = Postprocessor::from("klipper");
        assert_eq!(pp, Postprocessor::Other("klipper".to_string()));
        assert_eq!(pp.as_str(), "klipper");
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!Postprocessor::from("RAPID").is_rapid());
        assert!(!Postprocessor::from("Rapid").is_rapid());
    }

    #[test]
    fn test_extruder_divisor() {
        assert_eq!(Postprocessor::Rapid.extruder_divisor(), 100_000.0);
        assert_eq!(Postprocessor::from("").extruder_divisor(), 1.0);
    }

    #[test]
    fn test_glues_digits() {
        assert!(Postprocessor::Rapid.glues_digits());
        assert!(!Postprocessor::from("klipper").glues_digits());
    }

    #[test]
    fn test_display() {
        assert_eq!(Postprocessor::Rapid.to_string(), "rapid");
        assert_eq!(Postprocessor::from("marlin").to_string(), "marlin");
    }

    #[test]
    fn test_string_roundtrip() {
        let name: String = Postprocessor::from("klipper").into();
        assert_eq!(name, "klipper");
        let name: String = Postprocessor::Rapid.into();
        assert_eq!(name, "rapid");
    }
}
