//! RAPID socket statements emitted into converted programs.
//!
//! This module provides [`SocketConfig`], which names the socket handle and
//! the endpoint the robot connects to, and renders every RAPID statement the
//! converter writes:
//!
//! | Statement | Rendered form |
//! |-----------|---------------|
//! | Declaration | `VAR socketdev my_socket;` |
//! | Creation | `\tSocketCreate my_socket;` |
//! | Connection | `\tSocketConnect my_socket, "10.0.0.10", 1234;` |
//! | Send | `    SocketSend my_socket \Str := "E1.5";` |
//!
//! # Example
//!
//! ```
//! use rapid_socket::SocketConfig;
//! use std::net::Ipv4Addr;
//!
//! let socket = SocketConfig::default();
//! assert_eq!(socket.declaration(), "VAR socketdev my_socket;");
//!
//! let custom = SocketConfig::default()
//!     .with_name("toolhead")
//!     .with_address(Ipv4Addr::new(192, 168, 0, 42))
//!     .with_port(6969);
//! assert_eq!(
//!     custom.connect_statement(),
//!     "\tSocketConnect toolhead, \"192.168.0.42\", 6969;"
//! );
//! ```
//!
//! # Socket Names
//!
//! The name is written verbatim into RAPID source, so it must be a RAPID
//! identifier: an ASCII letter followed by letters, digits or underscores,
//! at most [`MAX_NAME_LEN`] characters. [`SocketConfig::validate`] checks
//! this; [`Converter::new`](crate::Converter::new) calls it.

use std::net::{Ipv4Addr, SocketAddrV4};

use crate::error::{ConvertError, Result};

/// Default socket variable name.
pub const DEFAULT_SOCKET_NAME: &str = "my_socket";

/// Default address of the external controller.
pub const DEFAULT_ADDRESS: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 10);

/// Default port of the external controller.
pub const DEFAULT_PORT: u16 = 1234;

/// Longest identifier RAPID accepts.
pub const MAX_NAME_LEN: usize = 32;

/// Indentation of rewritten `SocketSend` lines.
const SEND_INDENT: &str = "    ";

/// Socket handle and endpoint written into converted programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConfig {
    /// Name of the `socketdev` variable.
    pub name: String,
    /// Endpoint passed to `SocketConnect`.
    pub endpoint: SocketAddrV4,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SOCKET_NAME.to_string(),
            endpoint: SocketAddrV4::new(DEFAULT_ADDRESS, DEFAULT_PORT),
        }
    }
}

impl SocketConfig {
    /// Sets the socket variable name (default is `my_socket`).
    ///
    /// The name is checked by [`SocketConfig::validate`], not here.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the controller address (default is `10.0.0.10`).
    pub fn with_address(mut self, address: Ipv4Addr) -> Self {
        self.endpoint.set_ip(address);
        self
    }

    /// Sets the controller port (default is 1234).
    pub fn with_port(mut self, port: u16) -> Self {
        self.endpoint.set_port(port);
        self
    }

    /// Checks that the name is a valid RAPID identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidSocketName`] if the name is empty,
    /// longer than [`MAX_NAME_LEN`], does not start with an ASCII letter or
    /// contains anything other than ASCII letters, digits and underscores.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::SocketConfig;
    ///
    /// assert!(SocketConfig::default().with_name("toolhead_2").validate().is_ok());
    /// assert!(SocketConfig::default().with_name("tool head").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        let reason = match name.chars().next() {
            None => "name is empty",
            Some(first) if !first.is_ascii_alphabetic() => "must start with an ASCII letter",
            Some(_) if name.len() > MAX_NAME_LEN => "longer than 32 characters",
            Some(_) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                "only ASCII letters, digits and '_' are allowed"
            }
            Some(_) => return Ok(()),
        };
        Err(ConvertError::invalid_socket_name(name, reason))
    }

    /// Variable declaration placed after the module line.
    pub fn declaration(&self) -> String {
        format!("VAR socketdev {};", self.name)
    }

    /// Creation statement placed after the procedure line.
    pub fn create_statement(&self) -> String {
        format!("\tSocketCreate {};", self.name)
    }

    /// Connection statement placed after the creation statement.
    pub fn connect_statement(&self) -> String {
        format!(
            "\tSocketConnect {}, \"{}\", {};",
            self.name,
            self.endpoint.ip(),
            self.endpoint.port()
        )
    }

    /// Returns the three markers whose joint presence means a program is
    /// already set up.
    ///
    /// Markers carry no indentation or trailing semicolon.
    pub fn setup_markers(&self) -> [String; 3] {
        [
            format!("VAR socketdev {}", self.name),
            format!("SocketCreate {}", self.name),
            format!(
                "SocketConnect {}, \"{}\", {}",
                self.name,
                self.endpoint.ip(),
                self.endpoint.port()
            ),
        ]
    }

    /// Returns whether `text` already contains every setup marker.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::SocketConfig;
    ///
    /// let socket = SocketConfig::default();
    /// assert!(!socket.is_set_up("MODULE M\nPROC main()\nENDPROC"));
    /// ```
    pub fn is_set_up(&self, text: &str) -> bool {
        self.setup_markers()
            .iter()
            .all(|marker| text.contains(marker.as_str()))
    }

    /// Renders a `SocketSend` line carrying `tag` followed by `payload`.
    pub fn send_statement(&self, tag: char, payload: &str) -> String {
        format!(
            "{SEND_INDENT}SocketSend {} \\Str := \"{tag}{payload}\";",
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fragments() {
        let socket = SocketConfig::default();

        assert_eq!(socket.declaration(), "VAR socketdev my_socket;");
        assert_eq!(socket.create_statement(), "\tSocketCreate my_socket;");
        assert_eq!(
            socket.connect_statement(),
            "\tSocketConnect my_socket, \"10.0.0.10\", 1234;"
        );
    }

    #[test]
    fn test_with_endpoint() {
        let socket = SocketConfig::default()
            .with_address(Ipv4Addr::new(127, 0, 0, 1))
            .with_port(6969);

        assert_eq!(socket.endpoint.ip(), &Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(socket.endpoint.port(), 6969);
        assert_eq!(
            socket.connect_statement(),
            "\tSocketConnect my_socket, \"127.0.0.1\", 6969;"
        );
    }

    #[test]
    fn test_send_statement() {
        let socket = SocketConfig::default();
        assert_eq!(
            socket.send_statement('E', "1.23456"),
            "    SocketSend my_socket \\Str := \"E1.23456\";"
        );
    }

    #[test]
    fn test_is_set_up_requires_all_markers() {
        let socket = SocketConfig::default();
        let partial = "VAR socketdev my_socket;\nSocketCreate my_socket;";
        assert!(!socket.is_set_up(partial));

        let full = "VAR socketdev my_socket;\n\
                    SocketCreate my_socket;\n\
                    SocketConnect my_socket, \"10.0.0.10\", 1234;";
        assert!(socket.is_set_up(full));
    }

    #[test]
    fn test_validate_accepts_identifiers() {
        let longest = "a".repeat(MAX_NAME_LEN);
        for name in ["my_socket", "toolhead", "S", "sock_2", "Extruder", longest.as_str()] {
            assert!(
                SocketConfig::default().with_name(name).validate().is_ok(),
                "{name}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_identifiers() {
        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        for name in [
            "",
            "my socket",
            "sock\"et",
            "sock\nVAR num x",
            "2socket",
            "_socket",
            "sock-et",
            "sockét",
            too_long.as_str(),
        ] {
            let err = SocketConfig::default().with_name(name).validate().unwrap_err();
            assert!(
                matches!(err, ConvertError::InvalidSocketName { .. }),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_is_set_up_checks_endpoint() {
        let socket = SocketConfig::default().with_port(4321);
        let text = "VAR socketdev my_socket;\n\
                    SocketCreate my_socket;\n\
                    SocketConnect my_socket, \"10.0.0.10\", 1234;";
        assert!(!socket.is_set_up(text));
    }
}
