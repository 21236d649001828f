//! Emission configuration shared by every backend.

/// Layout options applied by a backend while it writes target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Whether top-level declarations are separated by one blank line
    pub blank_line_between_decls: bool,
    /// Whether placeholders carry the byte span of the node they replace
    pub emit_position_comments: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            blank_line_between_decls: true,
            emit_position_comments: false,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_blank_line_between_decls(mut self, enabled: bool) -> Self {
        self.blank_line_between_decls = enabled;
        self
    }

    pub fn with_position_comments(mut self, enabled: bool) -> Self {
        self.emit_position_comments = enabled;
        self
    }

    /// One level of indentation as text.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
