//! # RAPID Socket Converter
//!
//! A Rust library for rewriting ABB RAPID robot programs (`.mod` files, as
//! exported by RoboDK) so that toolhead commands travel over a socket to an
//! external controller instead of running on the robot.
//!
//! This is a **text-transformation** library. It does not parse RAPID, does
//! not validate programs and never opens a network connection itself; it only
//! writes the RAPID statements that make the robot controller do so.
//!
//! ## Features
//!
//! - **Idempotent**: socket setup is injected once; re-running is a no-op
//! - **Line-local**: non-matching lines are kept byte for byte, in place
//! - **Postprocessor aware**: `rapid` scaling and spacing rules, generic fallback
//! - **No panics**: all errors returned as `Result<T, ConvertError>`
//! - **No process control**: the library reports, the binary decides
//!
//! ## Quick Start
//!
//! ```
//! use rapid_socket::{Converter, ConverterConfig, Postprocessor};
//!
//! fn main() -> rapid_socket::Result<()> {
//!     let converter = Converter::new(ConverterConfig::new(Postprocessor::Rapid))?;
//!
//!     let source = "MODULE M\n\
//!                   PROC main_RoboDK()\n\
//!                   Extruder123456\n\
//!                   SetRPM1500\n\
//!                   M_RunCode104\n\
//!                   ENDPROC\n\
//!                   ENDMODULE";
//!
//!     let output = converter.convert_text(source, true)?;
//!     assert!(output.contains("SocketSend my_socket \\Str := \"E1.23456\";"));
//!     assert!(output.contains("SocketSend my_socket \\Str := \"F1500.0\";"));
//!     assert!(output.contains("SocketSend my_socket \\Str := \"M104.0\";"));
//!     Ok(())
//! }
//! ```
//!
//! ## What Gets Rewritten
//!
//! | Input | Output (`rapid`) |
//! |-------|------------------|
//! | first line containing `MODULE` | followed by `VAR socketdev my_socket;` |
//! | first line containing `PROC` | followed by `SocketCreate` and `SocketConnect` |
//! | `Extruder123456` | `SocketSend my_socket \Str := "E1.23456";` |
//! | `SetRPM1500` | `SocketSend my_socket \Str := "F1500.0";` |
//! | `M_RunCode104` | `SocketSend my_socket \Str := "M104.0";` |
//!
//! ## Files and Directories
//!
//! ```no_run
//! use rapid_socket::{Converter, ConverterConfig};
//!
//! let converter = Converter::new(ConverterConfig::new("rapid"))?;
//!
//! // Single file: injection + all passes
//! converter.process_file("program/main.mod")?;
//!
//! // Directory: all passes on every .mod, injection only on main.mod
//! let report = converter.process_directory("program/")?;
//! println!("{} file(s) converted", report.converted());
//! # Ok::<(), rapid_socket::ConvertError>(())
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use rapid_socket::{Converter, ConverterConfig, ConvertError, FileOutcome};
//!
//! let converter = Converter::new(ConverterConfig::new("rapid"))?;
//!
//! match converter.process_file("main.mod") {
//!     Ok(FileOutcome::Converted { path, .. }) => println!("converted {}", path.display()),
//!     Ok(FileOutcome::Skipped { error, .. }) => eprintln!("Error: {}", error),
//!     Err(ConvertError::InvalidExtension { .. }) => eprintln!("Error: Only *.mod files are accepted"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok::<(), ConvertError>(())
//! ```
//!
//! ## Configuration
//!
//! ```
//! use rapid_socket::{ConverterConfig, SocketConfig, WriteMode};
//! use std::net::Ipv4Addr;
//!
//! let config = ConverterConfig::new("klipper")
//!     .with_socket(
//!         SocketConfig::default()
//!             .with_name("toolhead")                    // default: my_socket
//!             .with_address(Ipv4Addr::new(10, 0, 0, 20)) // default: 10.0.0.10
//!             .with_port(6969),                         // default: 1234
//!     )
//!     .with_entry_point("main.mod")                     // default: main.mod
//!     .with_write_mode(WriteMode::Atomic);              // default: Truncate
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod config;
mod convert;
mod error;
mod inject;
mod postprocessor;
mod program;
mod rewrite;
mod socket;
pub mod utils;

// Public re-exports
pub use config::{ConverterConfig, FileConfig, WriteMode, DEFAULT_ENTRY_POINT};
pub use convert::{BatchReport, Converter, FileOutcome, PathReport};
pub use error::{ConvertError, Result};
pub use inject::{inject_socket, MODULE_TOKEN, PROC_TOKEN};
pub use postprocessor::{Postprocessor, RAPID, RAPID_EXTRUDER_DIVISOR};
pub use program::Program;
pub use rewrite::{CommandKind, CommandPass, CommandRewriter};
pub use socket::{SocketConfig, DEFAULT_ADDRESS, DEFAULT_PORT, DEFAULT_SOCKET_NAME, MAX_NAME_LEN};
