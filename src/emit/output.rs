//! Output sink with indentation tracking and nested capture buffers
//!
//! Everything a backend writes goes through [`Output`]. While a capture is open, writes land in the innermost
//! capture buffer instead of the live text; closing the capture hands back what was written and resumes the
//! previous target.

use super::config::EmitConfig;

/// A suspended write target.
#[derive(Debug)]
struct Capture {
    buffer: String,
    /// `at_line_start` of the target that was active when the capture opened
    resume_at_line_start: bool,
}

/// Writer that tracks indentation and builds target text
#[derive(Debug)]
pub struct Output {
    /// The live output
    live: String,
    /// Open captures; only the last one receives writes
    captures: Vec<Capture>,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indentation level
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl Output {
    pub fn new(config: &EmitConfig) -> Self {
        Self {
            live: String::new(),
            captures: Vec::new(),
            indent_level: 0,
            indent_width: config.indent_width,
            at_line_start: true,
        }
    }

    /// Hand back the live text and reset the sink for another run.
    pub fn take(&mut self) -> String {
        debug_assert!(self.captures.is_empty(), "take() while a capture is open");
        self.indent_level = 0;
        self.at_line_start = true;
        std::mem::take(&mut self.live)
    }

    /// The live text written so far (captures excluded).
    pub fn as_str(&self) -> &str {
        &self.live
    }

    fn target(&mut self) -> &mut String {
        match self.captures.last_mut() {
            Some(capture) => &mut capture.buffer,
            None => &mut self.live,
        }
    }

    // ------------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------------

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level (never below zero)
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Whitespace for `levels` indentation levels below the current one.
    ///
    /// Helpers that render multi-line text (struct bodies, closure bodies) use this so embedded lines carry
    /// absolute indentation and can be written verbatim.
    pub fn pad(&self, levels: usize) -> String {
        " ".repeat((self.indent_level + levels) * self.indent_width)
    }

    // ------------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------------

    fn write_indent(&mut self) {
        if self.at_line_start {
            let indent = " ".repeat(self.indent_level * self.indent_width);
            self.target().push_str(&indent);
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent at line start). Embedded newlines are written verbatim.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.target().push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.target().push('\n');
        self.at_line_start = true;
    }

    /// Finish the current line if anything was written on it.
    pub fn ensure_line_start(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
    }

    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    // ------------------------------------------------------------------------
    // Capture
    // ------------------------------------------------------------------------

    /// Redirect all writes into a fresh buffer until the matching [`Output::end_capture`].
    pub fn begin_capture(&mut self) {
        tracing::trace!(depth = self.captures.len() + 1, "begin capture");
        self.captures.push(Capture {
            buffer: String::new(),
            resume_at_line_start: self.at_line_start,
        });
        self.at_line_start = true;
    }

    /// Close the innermost capture and return its trimmed text.
    ///
    /// # Panics
    ///
    /// Panics when no capture is open; that is an engine bug, not a property of the input tree.
    pub fn end_capture(&mut self) -> String {
        let capture = self
            .captures
            .pop()
            .expect("INVARIANT: end_capture called without a matching begin_capture");
        self.at_line_start = capture.resume_at_line_start;
        tracing::trace!(depth = self.captures.len(), "end capture");
        capture.buffer.trim().to_string()
    }

    pub fn is_capturing(&self) -> bool {
        !self.captures.is_empty()
    }

    pub fn capture_depth(&self) -> usize {
        self.captures.len()
    }
}
