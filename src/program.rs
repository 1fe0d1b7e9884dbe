//! Line-oriented program text.
//!
//! A [`Program`] is the ordered list of lines of one `.mod` file. Passes never
//! edit it in place; they consume the lines and produce a new list.

/// Program source split into lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Program {
    /// Splits `text` into lines.
    ///
    /// `\n` and `\r\n` both terminate a line. A final terminator is
    /// remembered so that [`Program::to_text`] can restore it.
    ///
    /// # Example
    ///
    /// ```
    /// use rapid_socket::Program;
    ///
    /// let program = Program::parse("MODULE M\r\nENDMODULE\n");
    /// assert_eq!(program.lines(), ["MODULE M", "ENDMODULE"]);
    /// assert_eq!(program.to_text(), "MODULE M\nENDMODULE\n");
    /// ```
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Returns the lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the program has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replaces the lines with the result of `pass`, keeping the trailing
    /// newline flag.
    pub fn map_lines<F>(self, pass: F) -> Self
    where
        F: FnOnce(Vec<String>) -> Vec<String>,
    {
        Self {
            lines: pass(self.lines),
            trailing_newline: self.trailing_newline,
        }
    }

    /// Joins the lines with `\n`.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_trailing_newline() {
        let program = Program::parse("a\nb");
        assert_eq!(program.len(), 2);
        assert_eq!(program.to_text(), "a\nb");
    }

    #[test]
    fn test_parse_keeps_blank_lines() {
        let program = Program::parse("a\n\n\nb\n");
        assert_eq!(program.lines(), ["a", "", "", "b"]);
        assert_eq!(program.to_text(), "a\n\n\nb\n");
    }

    #[test]
    fn test_crlf_normalized() {
        let program = Program::parse("a\r\nb\r\n");
        assert_eq!(program.to_text(), "a\nb\n");
    }

    #[test]
    fn test_empty() {
        let program = Program::parse("");
        assert!(program.is_empty());
        assert_eq!(program.to_text(), "");
    }

    #[test]
    fn test_map_lines() {
        let program = Program::parse("a\nb\n").map_lines(|lines| {
            lines.into_iter().map(|l| l.to_uppercase()).collect()
        });
        assert_eq!(program.to_text(), "A\nB\n");
    }
}
