//! xlate_options: Compiler options.
//!
//! Options are read from a JSON document with camelCase keys. Every field
//! has a default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Options of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Names of the classes literals are typed as.
    pub literal_types: LiteralTypeNames,
    /// Package exporting the literal classes.
    pub stdlib_package: String,
    /// Scope of `stdlib_package` the literal classes are exported from.
    pub stdlib_scope: String,
    /// Upper bound on inference sweeps.
    pub max_inference_sweeps: usize,
    /// Whether files of definition-only packages export every declaration,
    /// exported or not.
    pub export_all_definition_only: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            literal_types: LiteralTypeNames::default(),
            stdlib_package: "stdlib".to_string(),
            stdlib_scope: "index".to_string(),
            max_inference_sweeps: 64,
            export_all_definition_only: true,
        }
    }
}

/// Class names backing each kind of literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiteralTypeNames {
    pub boolean: String,
    pub numeric: String,
    pub string: String,
    pub regex: String,
    pub array: String,
    pub map: String,
    pub error: String,
    pub promise: String,
}

impl Default for LiteralTypeNames {
    fn default() -> Self {
        Self {
            boolean: "TsBoolean".to_string(),
            numeric: "TsNumber".to_string(),
            string: "TsString".to_string(),
            regex: "RegExp".to_string(),
            array: "TsArray".to_string(),
            map: "TsMap".to_string(),
            error: "Error".to_string(),
            promise: "Promise".to_string(),
        }
    }
}

impl LiteralTypeNames {
    /// `(kind, class name)` pairs in `LiteralTypes` field order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("boolean", self.boolean.as_str()),
            ("numeric", self.numeric.as_str()),
            ("string", self.string.as_str()),
            ("regex", self.regex.as_str()),
            ("array", self.array.as_str()),
            ("map", self.map.as_str()),
            ("error", self.error.as_str()),
            ("promise", self.promise.as_str()),
        ]
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("could not read options file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse options from a JSON string.
pub fn parse_options(content: &str) -> Result<CompilerOptions, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse options from a JSON file.
pub fn parse_options_file(path: impl AsRef<Path>) -> Result<CompilerOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_options(&content)
}
