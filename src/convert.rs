//! Conversion pipeline and batch driver.
//!
//! This module provides the [`Converter`] struct, which runs the full
//! pipeline over program text and over `.mod` files on disk.
//!
//! # Pipeline
//!
//! 1. Socket setup injection (single files, and the entry point in
//!    directory mode)
//! 2. Extruder pass
//! 3. RPM pass
//! 4. M-code pass
//!
//! A missing anchor stops the pipeline for that file before any pass runs,
//! and the file is left untouched.
//!
//! # Example
//!
//! ```
//! use rapid_socket::{Converter, ConverterConfig, Postprocessor};
//!
//! let converter = Converter::new(ConverterConfig::new(Postprocessor::Rapid))?;
//! let output = converter.convert_text(
//!     "MODULE M\nPROC main_RoboDK()\nSetRPM1500\nENDPROC\nENDMODULE",
//!     true,
//! )?;
//!
//! assert!(output.contains("VAR socketdev my_socket;"));
//! assert!(output.contains("SocketSend my_socket \\Str := \"F1500.0\";"));
//! # Ok::<(), rapid_socket::ConvertError>(())
//! ```
//!
//! # Directory Runs
//!
//! [`Converter::process_directory`] visits the immediate children of a
//! directory in file-name order. A file that is not `.mod` aborts the run
//! with [`ConvertError::BatchAborted`]; files converted before it stay
//! converted on disk and the error reports how many there were.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ConverterConfig, WriteMode};
use crate::error::{ConvertError, Result};
use crate::inject::inject_socket;
use crate::program::Program;
use crate::rewrite::CommandRewriter;
use crate::utils::{has_mod_extension, is_hidden};

/// Result of processing one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was rewritten.
    Converted {
        /// Converted file.
        path: PathBuf,
        /// Whether socket setup injection ran on it.
        injected: bool,
    },
    /// A structural error left the file untouched.
    Skipped {
        /// Skipped file.
        path: PathBuf,
        /// Why injection failed.
        error: ConvertError,
    },
}

impl FileOutcome {
    /// Returns the file path.
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Converted { path, .. } | FileOutcome::Skipped { path, .. } => path,
        }
    }

    /// Returns whether the file was rewritten.
    pub fn is_converted(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

/// Summary of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-file outcomes in processing order.
    pub files: Vec<FileOutcome>,
    /// Sub-directories that were not processed.
    pub unexpected_entries: Vec<PathBuf>,
}

impl BatchReport {
    /// Number of files rewritten.
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.is_converted()).count()
    }

    /// Outcomes that were skipped because of structural errors.
    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| !f.is_converted())
    }
}

/// Result of [`Converter::process_path`].
#[derive(Debug)]
pub enum PathReport {
    /// A single file was processed.
    File(FileOutcome),
    /// A directory was processed.
    Directory(BatchReport),
}

/// Runs the conversion pipeline.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    rewriter: CommandRewriter,
}

impl Converter {
    /// Creates a converter, compiling the command passes.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidSocketName`] if the socket name is not a
    ///   RAPID identifier or a command pattern matches it.
    /// - [`ConvertError::Pattern`] if a command pattern fails to compile.
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.socket.validate()?;
        let rewriter = CommandRewriter::new(&config.postprocessor, &config.socket)?;
        Ok(Self { config, rewriter })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Converts program text.
    ///
    /// Injection runs only when `inject` is set.
    ///
    /// # Errors
    ///
    /// Returns a structural error if injection cannot find its anchors.
    pub fn convert_text(&self, text: &str, inject: bool) -> Result<String> {
        let text = if inject {
            inject_socket(text, &self.config.socket)?
        } else {
            text.to_string()
        };

        let program = Program::parse(&text).map_lines(|lines| self.rewriter.apply(lines));
        Ok(program.to_text())
    }

    /// Converts one `.mod` file in place, injecting socket setup.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidExtension`] if `path` is not a `.mod` file.
    /// - [`ConvertError::Io`] if the file cannot be read or written.
    ///
    /// Structural errors are not returned as `Err`; they come back as
    /// [`FileOutcome::Skipped`].
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<FileOutcome> {
        let path = path.as_ref();
        if !has_mod_extension(path) {
            return Err(ConvertError::invalid_extension(path));
        }
        self.convert_file(path, true)
    }

    /// Converts every `.mod` file directly inside `dir`.
    ///
    /// Only the entry-point file receives socket setup. Sub-directories are
    /// reported in [`BatchReport::unexpected_entries`] unless hidden.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::BatchAborted`] if a file is not `.mod` or an
    /// I/O error occurs part-way, and [`ConvertError::Io`] if the directory
    /// itself cannot be listed.
    pub fn process_directory(&self, dir: impl AsRef<Path>) -> Result<BatchReport> {
        let dir = dir.as_ref();
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<std::io::Result<Vec<_>>>()
            })
            .map_err(|e| ConvertError::io(dir, e))?;
        entries.sort();

        let mut report = BatchReport::default();
        for path in entries {
            if path.is_file() {
                if !has_mod_extension(&path) {
                    return Err(ConvertError::batch_aborted(
                        report.converted(),
                        ConvertError::invalid_extension(&path),
                    ));
                }
                let inject = self.is_entry_point(&path);
                let outcome = self
                    .convert_file(&path, inject)
                    .map_err(|e| ConvertError::batch_aborted(report.converted(), e))?;
                report.files.push(outcome);
            } else if !is_hidden(&path) {
                log::warn!("not a file: {}", path.display());
                report.unexpected_entries.push(path);
            }
        }

        log::info!(
            "{}: {} converted, {} skipped",
            dir.display(),
            report.converted(),
            report.files.len() - report.converted()
        );
        Ok(report)
    }

    /// Processes a file or a directory.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::PathNotFound`] if `path` does not exist.
    /// - [`ConvertError::UnsupportedPath`] if it is neither file nor directory.
    /// - Any error from [`Converter::process_file`] or
    ///   [`Converter::process_directory`].
    pub fn process_path(&self, path: impl AsRef<Path>) -> Result<PathReport> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConvertError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if path.is_file() {
            self.process_file(path).map(PathReport::File)
        } else if path.is_dir() {
            self.process_directory(path).map(PathReport::Directory)
        } else {
            Err(ConvertError::UnsupportedPath {
                path: path.to_path_buf(),
            })
        }
    }

    fn is_entry_point(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == self.config.entry_point.as_str())
    }

    fn convert_file(&self, path: &Path, inject: bool) -> Result<FileOutcome> {
        log::debug!("processing {} (inject: {})", path.display(), inject);
        let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;

        let converted = match self.convert_text(&text, inject) {
            Ok(converted) => converted,
            Err(error) if error.is_structural() => {
                log::warn!("{}: {}", path.display(), error);
                return Ok(FileOutcome::Skipped {
                    path: path.to_path_buf(),
                    error,
                });
            }
            Err(error) => return Err(error),
        };

        write_text(path, &converted, self.config.write_mode)?;
        log::info!("converted {}", path.display());
        Ok(FileOutcome::Converted {
            path: path.to_path_buf(),
            injected: inject,
        })
    }
}

fn write_text(path: &Path, text: &str, mode: WriteMode) -> Result<()> {
    match mode {
        WriteMode::Truncate => fs::write(path, text).map_err(|e| ConvertError::io(path, e)),
        WriteMode::Atomic => write_atomic(path, text),
    }
}

fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let target = fs::canonicalize(path).map_err(|e| ConvertError::io(path, e))?;
    let permissions = fs::metadata(&target)
        .map_err(|e| ConvertError::io(&target, e))?
        .permissions();

    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = fs::write(&tmp, text)
        .and_then(|()| fs::set_permissions(&tmp, permissions))
        .map_err(|e| ConvertError::io(&tmp, e))
        .and_then(|()| fs::rename(&tmp, &target).map_err(|e| ConvertError::io(&target, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
