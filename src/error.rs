//! Error types for program conversion.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting robot programs.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No line of the program contains the `MODULE` token.
    #[error("Could not find the MODULE line.")]
    ModuleAnchorMissing,

    /// A module line exists but no line contains the `PROC` token.
    #[error("Could not find the PROC main_RoboDK() line.")]
    ProcAnchorMissing,

    /// A file without the `.mod` extension was handed to the converter.
    #[error("Only *.mod files are accepted: {}", path.display())]
    InvalidExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// The input path does not exist.
    #[error("Path '{}' does not exist", path.display())]
    PathNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// The input path is neither a regular file nor a directory.
    #[error("'{}' is neither a file nor a directory", path.display())]
    UnsupportedPath {
        /// Offending path.
        path: PathBuf,
    },

    /// Reading or writing a program file failed.
    #[error("I/O error on '{}'", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A command pattern failed to compile.
    #[error("Invalid command pattern")]
    Pattern(#[from] regex::Error),

    /// The configuration file could not be loaded.
    #[error("Invalid configuration '{}': {reason}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// The configured socket name cannot be written into a program.
    #[error("Invalid socket name '{name}': {reason}")]
    InvalidSocketName {
        /// Rejected name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// A directory run stopped on a fatal error after rewriting some files.
    #[error("Batch aborted after converting {converted} file(s)")]
    BatchAborted {
        /// Files already rewritten on disk before the abort.
        converted: usize,
        /// The error that stopped the run.
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Creates a new `InvalidExtension` error.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::ConvertError;
    ///
    /// let err = ConvertError::invalid_extension("program.txt");
    /// assert!(err.is_fatal());
    /// ```
    pub fn invalid_extension(path: impl AsRef<Path>) -> Self {
        Self::InvalidExtension {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a new `Io` error tied to a file path.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new `Config` error.
    pub fn config(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidSocketName` error.
    pub fn invalid_socket_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSocketName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a fatal error that interrupted a directory run.
    pub fn batch_aborted(converted: usize, source: ConvertError) -> Self {
        Self::BatchAborted {
            converted,
            source: Box::new(source),
        }
    }

    /// Returns `true` for missing-anchor errors.
    ///
    /// Structural errors stop processing of one file only; a directory run
    /// records them and moves on.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::ConvertError;
    ///
    /// assert!(ConvertError::ModuleAnchorMissing.is_structural());
    /// assert!(!ConvertError::invalid_extension("a.txt").is_structural());
    /// ```
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::ModuleAnchorMissing | Self::ProcAnchorMissing)
    }

    /// Returns `true` for errors that end the whole run.
    pub fn is_fatal(&self) -> bool {
        !self.is_structural()
    }
}
