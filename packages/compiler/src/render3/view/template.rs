//! Template Parsing Options
//!
//! The request and response shapes exchanged with a template parser.

use crate::ml_parser::InterpolationConfig;
use crate::parse_util::ParseError;

/// The slice of a source file that holds the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerRange {
    pub start_pos: usize,
    pub start_line: usize,
    pub start_col: usize,
    pub end_pos: usize,
}

/// Options that are used when parsing a template.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTemplateOptions {
    /// Include whitespace nodes in the parsed output.
    pub preserve_whitespaces: bool,
    /// How to parse interpolation markers.
    pub interpolation_config: InterpolationConfig,
    /// The start and end point of the text to parse within the `source` string.
    pub range: Option<LexerRange>,
    /// If this text is stored in a JavaScript string, deal with escape sequences.
    pub escaped_string: bool,
    /// Render `$localize` message ids with additional legacy message ids.
    pub enable_i18n_legacy_message_id_format: bool,
    /// Whether to normalize line-endings in ICU expressions.
    pub i18n_normalize_line_endings_in_icus: bool,
}

impl Default for ParseTemplateOptions {
    fn default() -> Self {
        ParseTemplateOptions {
            preserve_whitespaces: false,
            interpolation_config: InterpolationConfig::default(),
            range: None,
            escaped_string: false,
            enable_i18n_legacy_message_id_format: true,
            i18n_normalize_line_endings_in_icus: false,
        }
    }
}

/// Information about the template which was extracted during parsing.
#[derive(Debug, Clone)]
pub struct ParsedTemplate<T> {
    /// Any errors from parsing the template.
    pub errors: Option<Vec<ParseError>>,
    /// The template AST, parsed from the template.
    pub nodes: Vec<T>,
    /// Any ng-content selectors extracted from the template.
    pub ng_content_selectors: Vec<String>,
}

impl<T> Default for ParsedTemplate<T> {
    fn default() -> Self {
        ParsedTemplate {
            errors: None,
            nodes: Vec::new(),
            ng_content_selectors: Vec::new(),
        }
    }
}
