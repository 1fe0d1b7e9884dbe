//! Converter configuration.
//!
//! [`ConverterConfig`] gathers everything a [`Converter`](crate::Converter)
//! needs: the postprocessor, the socket to emit, the entry-point file name
//! used in directory mode and the write strategy.
//!
//! Settings can also come from a TOML file ([`FileConfig`]); every key is
//! optional and unset keys keep their defaults.
//!
//! ```toml
//! socket_name = "toolhead"
//! address = "192.168.0.42"
//! port = 6969
//! entry_point = "main.mod"
//! atomic_writes = true
//! ```
//!
//! # Example
//!
//! ```
//! use rapid_socket::{ConverterConfig, Postprocessor, SocketConfig, WriteMode};
//!
//! let config = ConverterConfig::new(Postprocessor::Rapid)
//!     .with_socket(SocketConfig::default().with_port(6969))
//!     .with_entry_point("printer.mod")
//!     .with_write_mode(WriteMode::Atomic);
//!
//! assert_eq!(config.entry_point, "printer.mod");
//! assert_eq!(config.socket.endpoint.port(), 6969);
//! ```

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConvertError, Result};
use crate::postprocessor::Postprocessor;
use crate::socket::SocketConfig;

/// File that receives socket setup in directory mode.
pub const DEFAULT_ENTRY_POINT: &str = "main.mod";

/// How converted text replaces the original file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the file in place.
    ///
    /// A crash mid-write can leave the file partially written.
    #[default]
    Truncate,
    /// Write a sibling `.tmp` file and rename it over the original.
    ///
    /// Symlinks are resolved first, so the rename replaces the link target
    /// and the link itself is kept. The original file's permissions are
    /// copied onto the temp file before the rename. The temp file is removed
    /// if writing or renaming fails, but a crash can leave `<file>.mod.tmp`
    /// behind; a later directory run then aborts on it as a non-`.mod` file
    /// until it is deleted.
    Atomic,
}

/// Configuration for creating a converter.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Target postprocessor.
    pub postprocessor: Postprocessor,
    /// Socket handle and endpoint written into programs.
    pub socket: SocketConfig,
    /// File name that receives socket setup in directory mode.
    pub entry_point: String,
    /// Write-back strategy.
    pub write_mode: WriteMode,
}

impl ConverterConfig {
    /// Creates a configuration with the default socket and entry point.
    pub fn new(postprocessor: impl Into<Postprocessor>) -> Self {
        Self {
            postprocessor: postprocessor.into(),
            socket: SocketConfig::default(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            write_mode: WriteMode::default(),
        }
    }

    /// Sets the socket written into programs.
    pub fn with_socket(mut self, socket: SocketConfig) -> Self {
        self.socket = socket;
        self
    }

    /// Sets the entry-point file name (default is `main.mod`).
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Sets the write-back strategy.
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Applies every key set in `file`.
    pub fn merge(mut self, file: FileConfig) -> Self {
        if let Some(name) = file.socket_name {
            self.socket = self.socket.with_name(name);
        }
        if let Some(address) = file.address {
            self.socket = self.socket.with_address(address);
        }
        if let Some(port) = file.port {
            self.socket = self.socket.with_port(port);
        }
        if let Some(entry_point) = file.entry_point {
            self.entry_point = entry_point;
        }
        match file.atomic_writes {
            Some(true) => self.write_mode = WriteMode::Atomic,
            Some(false) => self.write_mode = WriteMode::Truncate,
            None => {}
        }
        self
    }
}

/// Optional settings read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Socket variable name.
    pub socket_name: Option<String>,
    /// Controller address.
    pub address: Option<Ipv4Addr>,
    /// Controller port.
    pub port: Option<u16>,
    /// Entry-point file name.
    pub entry_point: Option<String>,
    /// Use temp-file-and-rename writes.
    pub atomic_writes: Option<bool>,
}

impl FileConfig {
    /// Parses settings from TOML text.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::FileConfig;
    ///
    /// let file = FileConfig::from_toml("port = 6969").unwrap();
    /// assert_eq!(file.port, Some(6969));
    /// assert_eq!(file.address, None);
    /// ```
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConvertError::config(path, e.to_string()))?;
        Self::from_toml(&text).map_err(|e| ConvertError::config(path, e.to_string()))
    }
}
