//! Socket setup injection.
//!
//! [`inject_socket`] adds the socket declaration after the first line
//! containing `MODULE` and the creation/connection statements after the first
//! line containing `PROC`.
//!
//! Anchors are found by plain substring search on each raw line, so
//! `ENDMODULE`, `! MODULE notes` or `PROCESS` all count. Programs exported by
//! RoboDK rely on this: the module and procedure lines are the first to
//! contain the tokens.
//!
//! # Example
//!
//! ```
//! use rapid_socket::{inject_socket, SocketConfig};
//!
//! let source = "MODULE M\nPROC main_RoboDK()\nENDPROC\nENDMODULE";
//! let output = inject_socket(source, &SocketConfig::default()).unwrap();
//!
//! assert_eq!(
//!     output,
//!     "MODULE M\n\
//!      VAR socketdev my_socket;\n\
//!      PROC main_RoboDK()\n\
//!      \tSocketCreate my_socket;\n\
//!      \tSocketConnect my_socket, \"10.0.0.10\", 1234;\n\
//!      ENDPROC\n\
//!      ENDMODULE"
//! );
//!
//! // Already set up: returned unchanged.
//! assert_eq!(inject_socket(&output, &SocketConfig::default()).unwrap(), output);
//! ```

use crate::error::{ConvertError, Result};
use crate::program::Program;
use crate::socket::SocketConfig;

/// Token marking the module line.
pub const MODULE_TOKEN: &str = "MODULE";

/// Token marking the entry procedure line.
pub const PROC_TOKEN: &str = "PROC";

/// Inserts socket setup statements into `text`.
///
/// Returns `text` unchanged if the declaration, creation and connection
/// statements are all present already, without looking for anchors.
///
/// # Errors
///
/// - [`ConvertError::ModuleAnchorMissing`] if no line contains `MODULE`.
/// - [`ConvertError::ProcAnchorMissing`] if no line contains `PROC`.
///
/// Nothing is inserted in either case.
pub fn inject_socket(text: &str, socket: &SocketConfig) -> Result<String> {
    if socket.is_set_up(text) {
        log::debug!("socket '{}' already set up", socket.name);
        return Ok(text.to_string());
    }

    let program = Program::parse(text);
    let mut lines = Vec::with_capacity(program.len() + 3);
    let mut module_found = false;
    let mut proc_found = false;

    for line in program.lines() {
        lines.push(line.clone());

        if !module_found && line.contains(MODULE_TOKEN) {
            module_found = true;
            lines.push(socket.declaration());
        }

        if !proc_found && line.contains(PROC_TOKEN) {
            proc_found = true;
            lines.push(socket.create_statement());
            lines.push(socket.connect_statement());
        }
    }

    if !module_found {
        return Err(ConvertError::ModuleAnchorMissing);
    }
    if !proc_found {
        return Err(ConvertError::ProcAnchorMissing);
    }

    Ok(program.map_lines(|_| lines).to_text())
}
