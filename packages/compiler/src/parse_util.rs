//! Parse Utilities
//!
//! Source files, locations and spans shared by the template parser, the output AST and the
//! diagnostics it reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

/// A point in a source file. `line` and `col` are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocation {
    pub file: Arc<ParseSourceFile>,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: Arc<ParseSourceFile>, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file,
            offset,
            line,
            col,
        }
    }

    /// Whether this location points into real content rather than a synthetic file.
    pub fn is_resolved(&self) -> bool {
        self.offset <= self.file.content.len()
    }

    /// Return up to `max_chars` characters (stopping after `max_lines` newlines) on each side of
    /// the location.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        if !self.is_resolved() || self.file.content.is_empty() {
            return None;
        }
        let content = &self.file.content;
        let (head, tail) = content.split_at(floor_char_boundary(content, self.offset));

        let mut before: Vec<char> = Vec::new();
        let mut lines = 0;
        for ch in head.chars().rev().take(max_chars) {
            if ch == '\n' {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            before.push(ch);
        }
        before.reverse();

        let mut after = String::new();
        lines = 0;
        for ch in tail.chars().take(max_chars) {
            if ch == '\n' {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            after.push(ch);
        }

        Some((before.into_iter().collect(), after))
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resolved() {
            write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
        } else {
            write!(f, "{}", self.file.url)
        }
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan {
            start,
            end,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The source text covered by this span, empty for synthetic spans.
    pub fn text(&self) -> &str {
        self.start
            .file
            .content
            .get(self.start.offset..self.end.offset)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn contextual_message(&self) -> String {
        match self.span.start.get_context(100, 3) {
            Some((before, after)) => {
                let level = match self.level {
                    ParseErrorLevel::Warning => "WARNING",
                    ParseErrorLevel::Error => "ERROR",
                };
                format!("{} (\"{}[{} ->]{}\")", self.msg, before, level, after)
            }
            None => self.msg.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.contextual_message(), self.span.start)?;
        if let Some(details) = &self.span.details {
            write!(f, ", {}", details)?;
        }
        Ok(())
    }
}

/// Synthetic span pointing at a declaration rather than at template text, e.g.
/// `in Component MyCmp in /app/my_cmp.js`.
pub fn r3_jit_type_source_span(kind: &str, type_name: &str, source_url: &str) -> ParseSourceSpan {
    let source_file_name = format!("in {} {} in {}", kind, type_name, source_url);
    let source_file = Arc::new(ParseSourceFile::new("", source_file_name));
    ParseSourceSpan::new(
        ParseLocation::new(source_file.clone(), usize::MAX, usize::MAX, usize::MAX),
        ParseLocation::new(source_file, usize::MAX, usize::MAX, usize::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(content: &str, start: usize, end: usize) -> ParseSourceSpan {
        let file = Arc::new(ParseSourceFile::new(content, "/app/cmp.html"));
        ParseSourceSpan::new(
            ParseLocation::new(file.clone(), start, 0, start),
            ParseLocation::new(file, end, 0, end),
        )
    }

    #[test]
    fn should_render_errors_with_context_and_location() {
        let error = ParseError::new(span_at("<div><span></div>", 5, 11), "Unexpected tag");
        assert_eq!(
            error.to_string(),
            "Unexpected tag (\"<div>[ERROR ->]<span></div>\"): /app/cmp.html@0:5"
        );
    }

    #[test]
    fn should_return_covered_text() {
        assert_eq!(span_at("<div><span></div>", 5, 11).text(), "<span>");
    }

    #[test]
    fn should_name_the_declaration_in_synthetic_spans() {
        let span = r3_jit_type_source_span("Component", "MyCmp", "/app/my_cmp.js");
        assert_eq!(span.start.file.url, "in Component MyCmp in /app/my_cmp.js");
        assert!(!span.start.is_resolved());
        assert_eq!(span.start.to_string(), "in Component MyCmp in /app/my_cmp.js");
        assert_eq!(span.text(), "");
    }
}
