//! Loading trees from text or files
//!
//! Trees arrive as JSON (the usual output of JavaScript parsers) or YAML. Both
//! decode into an order-preserving [`serde_json::Value`].

use crate::error::TreeError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Serialization of a tree on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeFormat {
    #[default]
    Json,
    Yaml,
}

impl TreeFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> TreeFormat {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => TreeFormat::Yaml,
            _ => TreeFormat::Json,
        }
    }
}

impl FromStr for TreeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(TreeFormat::Json),
            "yaml" | "yml" => Ok(TreeFormat::Yaml),
            other => Err(format!("unknown tree format '{}' (expected json or yaml)", other)),
        }
    }
}

/// Decode a tree from text
pub fn load_tree(text: &str, format: TreeFormat) -> Result<Value, TreeError> {
    let tree = match format {
        TreeFormat::Json => serde_json::from_str(text)?,
        TreeFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(tree)
}

/// Read and decode a tree file; the format is guessed from the extension when
/// not given
pub fn load_tree_file(path: impl AsRef<Path>, format: Option<TreeFormat>) -> Result<Value, TreeError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    load_tree(&text, format.unwrap_or_else(|| TreeFormat::from_path(path)))
}
