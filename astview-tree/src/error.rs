//! Error types
//!
//! Unexpected tree shapes are never errors; they are display variants handled by
//! classification. The errors here cover reading trees and running the external
//! parser/transformer commands.

use std::fmt;

/// Error that can occur when loading a tree from text or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// IO error when reading the file
    Io(String),
    /// The text is not valid JSON
    Json(String),
    /// The text is not valid YAML (or has non-string map keys)
    Yaml(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Io(msg) => write!(f, "IO error: {}", msg),
            TreeError::Json(msg) => write!(f, "Invalid JSON tree: {}", msg),
            TreeError::Yaml(msg) => write!(f, "Invalid YAML tree: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for TreeError {
    fn from(err: serde_yaml::Error) -> Self {
        TreeError::Yaml(err.to_string())
    }
}

/// Error reported by a parser or transformer collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The command could not be started
    Spawn { command: String, message: String },
    /// The command ran and exited unsuccessfully
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    /// The command succeeded but its output is unusable
    Output(String),
    /// The produced tree could not be decoded
    Tree(TreeError),
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::Spawn { command, message } => {
                write!(f, "Failed to run `{}`: {}", command, message)
            }
            CollaboratorError::Failed {
                command,
                status,
                stderr,
            } => {
                let stderr = stderr.trim();
                match (status, stderr.is_empty()) {
                    (Some(code), true) => write!(f, "`{}` exited with status {}", command, code),
                    (Some(code), false) => {
                        write!(f, "`{}` exited with status {}: {}", command, code, stderr)
                    }
                    (None, true) => write!(f, "`{}` was terminated by a signal", command),
                    (None, false) => write!(f, "`{}` was terminated: {}", command, stderr),
                }
            }
            CollaboratorError::Output(msg) => write!(f, "Unusable output: {}", msg),
            CollaboratorError::Tree(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CollaboratorError {}

impl From<TreeError> for CollaboratorError {
    fn from(err: TreeError) -> Self {
        CollaboratorError::Tree(err)
    }
}
