//! Command line rewriting.
//!
//! RoboDK emits toolhead commands as RAPID procedure calls. Each
//! [`CommandPass`] looks for one command family and replaces every matching
//! line with a `SocketSend` statement carrying a one-letter tag and the
//! command's number.
//!
//! # Command Families
//!
//! | Kind | Tag | `rapid` pattern | generic pattern | Scaling |
//! |------|-----|-----------------|-----------------|---------|
//! | [`CommandKind::Extruder`] | `E` | `Extruder\s?N` | `Extruder\s?N` | `rapid`: ÷ 100000 |
//! | [`CommandKind::Rpm`] | `F` | `SetRPMN` | `SetRPM\s+N` | none |
//! | [`CommandKind::MCode`] | `M` | `M_RunCodeN` | `M_RunCode\s+N` | none |
//!
//! `N` is a run of ASCII digits. The keyword may appear anywhere in the line;
//! the whole line is replaced.
//!
//! # Example
//!
//! ```
//! use rapid_socket::{CommandKind, CommandPass, Postprocessor, SocketConfig};
//!
//! let pass = CommandPass::new(CommandKind::Extruder, &Postprocessor::Rapid, SocketConfig::default())?;
//! let lines = vec!["Extruder123456".to_string(), "MoveL p1, v100, z1, tool0;".to_string()];
//!
//! assert_eq!(
//!     pass.apply(lines),
//!     [
//!         "    SocketSend my_socket \\Str := \"E1.23456\";",
//!         "MoveL p1, v100, z1, tool0;",
//!     ]
//! );
//! # Ok::<(), rapid_socket::ConvertError>(())
//! ```

use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::postprocessor::Postprocessor;
use crate::socket::SocketConfig;
use crate::utils::format_payload;

/// Command family handled by a rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Extrusion rate (`Extruder`), sent with tag `E`.
    Extruder,
    /// Spindle or heater speed (`SetRPM`), sent with tag `F`.
    Rpm,
    /// Custom M-code (`M_RunCode`), sent with tag `M`.
    MCode,
}

impl CommandKind {
    /// All command kinds in the order the passes run.
    pub const ALL: [CommandKind; 3] = [CommandKind::Extruder, CommandKind::Rpm, CommandKind::MCode];

    /// Returns the procedure name RoboDK emits for this command.
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Extruder => "Extruder",
            CommandKind::Rpm => "SetRPM",
            CommandKind::MCode => "M_RunCode",
        }
    }

    /// Returns the payload tag.
    pub fn tag(self) -> char {
        match self {
            CommandKind::Extruder => 'E',
            CommandKind::Rpm => 'F',
            CommandKind::MCode => 'M',
        }
    }

    /// Returns the regular expression matching this command.
    ///
    /// The digits are captured in group 1.
    pub fn pattern(self, postprocessor: &Postprocessor) -> String {
        let separator = match self {
            CommandKind::Extruder => r"\s?",
            CommandKind::Rpm | CommandKind::MCode if postprocessor.glues_digits() => "",
            CommandKind::Rpm | CommandKind::MCode => r"\s+",
        };
        format!("{}{}([0-9]+)", regex::escape(self.keyword()), separator)
    }

    /// Returns the divisor applied to the matched number.
    pub fn divisor(self, postprocessor: &Postprocessor) -> f64 {
        match self {
            CommandKind::Extruder => postprocessor.extruder_divisor(),
            CommandKind::Rpm | CommandKind::MCode => 1.0,
        }
    }

    /// Encodes the matched digits as a payload number.
    ///
    /// Returns `None` if `digits` is not a number.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::{CommandKind, Postprocessor};
    ///
    /// let rapid = Postprocessor::Rapid;
    /// assert_eq!(CommandKind::Extruder.encode("123456", &rapid).as_deref(), Some("1.23456"));
    /// assert_eq!(CommandKind::Rpm.encode("1500", &rapid).as_deref(), Some("1500.0"));
    /// ```
    pub fn encode(self, digits: &str, postprocessor: &Postprocessor) -> Option<String> {
        let value: f64 = digits.parse().ok()?;
        Some(format_payload(value / self.divisor(postprocessor)))
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One compiled rewrite pass.
#[derive(Debug, Clone)]
pub struct CommandPass {
    kind: CommandKind,
    postprocessor: Postprocessor,
    socket: SocketConfig,
    regex: Regex,
}

impl CommandPass {
    /// Compiles the pass for `kind` under `postprocessor`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Pattern`](crate::ConvertError::Pattern) if the
    /// pattern fails to compile.
    pub fn new(kind: CommandKind, postprocessor: &Postprocessor, socket: SocketConfig) -> Result<Self> {
        let regex = Regex::new(&kind.pattern(postprocessor))?;
        Ok(Self {
            kind,
            postprocessor: postprocessor.clone(),
            socket,
            regex,
        })
    }

    /// Returns the command kind.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Rewrites a single line, or returns `None` if it does not match.
    pub fn rewrite_line(&self, line: &str) -> Option<String> {
        let digits = self.regex.captures(line)?.get(1)?.as_str();
        let payload = self.kind.encode(digits, &self.postprocessor)?;
        Some(self.socket.send_statement(self.kind.tag(), &payload))
    }

    /// Rewrites every matching line, passing others through untouched.
    pub fn apply(&self, lines: Vec<String>) -> Vec<String> {
        let mut rewritten = 0usize;
        let output: Vec<String> = lines
            .into_iter()
            .map(|line| match self.rewrite_line(&line) {
                Some(statement) => {
                    rewritten += 1;
                    statement
                }
                None => line,
            })
            .collect();
        log::debug!("{} pass rewrote {} line(s)", self.kind, rewritten);
        output
    }
}

/// The three passes in their fixed order.
#[derive(Debug, Clone)]
pub struct CommandRewriter {
    passes: Vec<CommandPass>,
}

impl CommandRewriter {
    /// Compiles the extruder, RPM and M-code passes.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::Pattern`] if a pattern fails to compile.
    /// - [`ConvertError::InvalidSocketName`] if a pattern matches the socket
    ///   name. The passes would otherwise rewrite the injected setup lines
    ///   into `SocketSend` statements.
    pub fn new(postprocessor: &Postprocessor, socket: &SocketConfig) -> Result<Self> {
        let passes = CommandKind::ALL
            .iter()
            .map(|&kind| CommandPass::new(kind, postprocessor, socket.clone()))
            .collect::<Result<Vec<_>>>()?;

        if let Some(pass) = passes.iter().find(|pass| pass.regex.is_match(&socket.name)) {
            return Err(ConvertError::invalid_socket_name(
                socket.name.as_str(),
                format!("matches the {} command pattern", pass.kind),
            ));
        }
        Ok(Self { passes })
    }

    /// Returns the passes in execution order.
    pub fn passes(&self) -> &[CommandPass] {
        &self.passes
    }

    /// Runs all passes over `lines`.
    pub fn apply(&self, lines: Vec<String>) -> Vec<String> {
        self.passes
            .iter()
            .fold(lines, |lines, pass| pass.apply(lines))
    }
}
