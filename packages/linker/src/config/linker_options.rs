use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options that tune how a file is linked. Every key may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkerOptions {
    /// Hoist constants of every declaration in a file into one shared list of top-level
    /// statements. When off, each declaration gets its constants in its own closure.
    pub enable_global_statements: bool,
    /// Render `$localize` message ids with legacy message ids as well.
    pub enable_i18n_legacy_message_id_format: bool,
    #[serde(rename = "i18nNormalizeLineEndingsInICUs")]
    pub i18n_normalize_line_endings_in_icus: bool,
}

impl Default for LinkerOptions {
    fn default() -> Self {
        Self {
            enable_global_statements: true,
            enable_i18n_legacy_message_id_format: true,
            i18n_normalize_line_endings_in_icus: false,
        }
    }
}

impl LinkerOptions {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let options: LinkerOptions =
            serde_json::from_str(content).context("invalid linker options")?;
        Ok(options)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read linker options from {}", path.display()))?;
        Self::from_json(&content)
    }
}
