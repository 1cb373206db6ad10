use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlEntry, KdlValue};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use weaver_editor_search::{DEFAULT_HISTORY_DEPTH, QueryMode};

/// Settings read from `find.kdl`.
///
/// ```kdl
/// case-sensitive false
/// mode "literal"
/// history-depth 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindConfig {
    pub case_sensitive: bool,
    pub mode: QueryMode,
    pub history_depth: usize,
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            mode: QueryMode::Literal,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl FindConfig {
    /// Load the config at `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path).into_diagnostic()?;
        Self::parse(&source).wrap_err_with(|| format!("in config file {}", path.display()))
    }

    pub fn parse(source: &str) -> Result<Self> {
        let doc: KdlDocument = source.parse().into_diagnostic()?;
        let mut config = Self::default();

        if let Some(value) = first_value(&doc, "case-sensitive") {
            config.case_sensitive = value
                .as_bool()
                .ok_or_else(|| miette!("`case-sensitive` must be true or false"))?;
        }

        if let Some(value) = first_value(&doc, "mode") {
            let name = value
                .as_string()
                .ok_or_else(|| miette!("`mode` must be a string"))?;
            config.mode = name.parse()?;
        }

        if let Some(value) = first_value(&doc, "history-depth") {
            let depth = value
                .as_i64()
                .ok_or_else(|| miette!("`history-depth` must be an integer"))?;
            config.history_depth = usize::try_from(depth)
                .map_err(|_| miette!("`history-depth` must not be negative, got {depth}"))?;
        }

        Ok(config)
    }
}

fn first_value<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
    doc.get(name)?.entries().first().map(KdlEntry::value)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("weaver").join("find.kdl"))
}
