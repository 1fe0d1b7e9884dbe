//! Utility functions for payload formatting and path checks.
//!
//! # Example
//!
//! ```
//! use rapid_socket::utils::{format_payload, has_mod_extension};
//!
//! assert_eq!(format_payload(1500.0), "1500.0");
//! assert_eq!(format_payload(1.23456), "1.23456");
//! assert_eq!(format_payload(0.00001), "1e-05");
//!
//! assert!(has_mod_extension("programs/main.mod"));
//! assert!(!has_mod_extension("programs/main.MOD"));
//! ```

use std::path::Path;

/// File extension accepted by the converter (case-sensitive).
pub const MOD_EXTENSION: &str = "mod";

/// Formats a payload number the way the toolhead firmware expects it.
///
/// The shortest representation that round-trips is used, always with a
/// fractional part (`1500.0`, never `1500`). Very large or very small values
/// switch to exponent notation with an explicit sign and at least two
/// exponent digits (`1e+16`, `1e-05`).
///
/// # Example
///
/// ```
/// use rapid_socket::utils::format_payload;
///
/// assert_eq!(format_payload(104.0), "104.0");
/// assert_eq!(format_payload(7.89012), "7.89012");
/// assert_eq!(format_payload(1e16), "1e+16");
/// ```
pub fn format_payload(value: f64) -> String {
    // Debug output switches to exponent form below 1e-4 and from 1e16 up.
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Returns whether `path` ends in `.mod`.
///
/// # Example
///
/// ```
/// use rapid_socket::utils::has_mod_extension;
///
/// assert!(has_mod_extension("main.mod"));
/// assert!(!has_mod_extension("main.mod.bak"));
/// assert!(!has_mod_extension("mod"));
/// ```
pub fn has_mod_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == MOD_EXTENSION)
}

/// Returns whether a directory entry name is hidden (starts with `.`).
pub fn is_hidden(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
