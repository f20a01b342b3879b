//! Parser and transformer collaborators
//!
//! Parsing program text and applying a rule to it are done outside this crate.
//! The command-backed implementations run a shell command with the source text
//! on stdin and take stdout as the result. For transformers, the rule text is
//! written to a temporary file whose path replaces `{rule}` in the command line.

use crate::error::CollaboratorError;
use crate::tree::{load_tree, TreeFormat};
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

/// Placeholder replaced by the rule file path in transformer commands
pub const RULE_PLACEHOLDER: &str = "{rule}";

/// Turns source text into a tree
pub trait Parser {
    fn parse(&self, source: &str) -> Result<Value, CollaboratorError>;
}

/// Applies a rule to source text
pub trait Transformer {
    fn transform(&self, source: &str, rule: &str) -> Result<String, CollaboratorError>;
}

/// Parser for sources that already are a serialized tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeFileParser {
    format: TreeFormat,
}

impl TreeFileParser {
    pub fn new(format: TreeFormat) -> Self {
        TreeFileParser { format }
    }
}

impl Parser for TreeFileParser {
    fn parse(&self, source: &str) -> Result<Value, CollaboratorError> {
        Ok(load_tree(source, self.format)?)
    }
}

/// Parser backed by an external command printing a JSON tree
#[derive(Debug, Clone)]
pub struct CommandParser {
    command: String,
}

impl CommandParser {
    pub fn new(command: impl Into<String>) -> Self {
        CommandParser {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Parser for CommandParser {
    fn parse(&self, source: &str) -> Result<Value, CollaboratorError> {
        let stdout = run_shell(&self.command, source)?;
        Ok(load_tree(&stdout, TreeFormat::Json)?)
    }
}

/// Transformer backed by an external command printing the rewritten source
#[derive(Debug, Clone)]
pub struct CommandTransformer {
    command: String,
}

impl CommandTransformer {
    pub fn new(command: impl Into<String>) -> Self {
        CommandTransformer {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Transformer for CommandTransformer {
    fn transform(&self, source: &str, rule: &str) -> Result<String, CollaboratorError> {
        let mut rule_file = tempfile::Builder::new()
            .prefix("astview-rule-")
            .suffix(".js")
            .tempfile()
            .map_err(|e| self.spawn_error(e))?;
        rule_file
            .write_all(rule.as_bytes())
            .and_then(|_| rule_file.flush())
            .map_err(|e| self.spawn_error(e))?;

        let rule_path = rule_file.path().to_string_lossy().into_owned();
        let command = self.command.replace(RULE_PLACEHOLDER, &rule_path);
        // rule_file is deleted when dropped, after the command has finished
        run_shell(&command, source)
    }
}

impl CommandTransformer {
    fn spawn_error(&self, err: std::io::Error) -> CollaboratorError {
        CollaboratorError::Spawn {
            command: self.command.clone(),
            message: err.to_string(),
        }
    }
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

/// Run `command` through the shell with `input` on stdin, returning stdout
fn run_shell(command: &str, input: &str) -> Result<String, CollaboratorError> {
    tracing::debug!(command, "running collaborator");
    let spawn_error = |err: std::io::Error| CollaboratorError::Spawn {
        command: command.to_string(),
        message: err.to_string(),
    };

    let mut child = shell(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    // Written from a separate thread: the command may fill stdout before it
    // drains stdin.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_owned();
        std::thread::spawn(move || {
            // A command that exits without reading stdin closes the pipe early;
            // its exit status is what gets reported.
            let _ = stdin.write_all(input.as_bytes());
        })
    });

    let output = child.wait_with_output().map_err(spawn_error)?;
    if let Some(writer) = writer {
        let _ = writer.join();
    }
    if !output.status.success() {
        return Err(CollaboratorError::Failed {
            command: command.to_string(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    String::from_utf8(output.stdout)
        .map_err(|_| CollaboratorError::Output(format!("`{}` printed non-UTF-8 output", command)))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tree_file_parser_reads_json() {
        let tree = TreeFileParser::default()
            .parse(r#"{"type": "Program", "body": []}"#)
            .unwrap();
        assert_eq!(tree, json!({"type": "Program", "body": []}));
    }

    #[test]
    fn command_parser_reads_stdout() {
        let parser = CommandParser::new(r#"printf '{"type":"File"}'"#);
        assert_eq!(parser.parse("ignored").unwrap(), json!({"type": "File"}));
    }

    #[test]
    fn command_parser_reports_failure() {
        let parser = CommandParser::new("echo 'SyntaxError: Unexpected token' >&2; exit 3");
        let err = parser.parse("var = ;").unwrap_err();
        assert_eq!(
            err,
            CollaboratorError::Failed {
                command: "echo 'SyntaxError: Unexpected token' >&2; exit 3".to_string(),
                status: Some(3),
                stderr: "SyntaxError: Unexpected token\n".to_string(),
            }
        );
    }

    #[test]
    fn command_parser_rejects_invalid_json() {
        let parser = CommandParser::new("echo not-json");
        assert!(matches!(
            parser.parse("").unwrap_err(),
            CollaboratorError::Tree(_)
        ));
    }

    #[test]
    fn transformer_passes_source_and_rule_file() {
        // Prints the rule file contents, then the source from stdin
        let transformer = CommandTransformer::new("cat {rule}; cat");
        let output = transformer.transform("var a = 10;", "// rule\n").unwrap();
        assert_eq!(output, "// rule\nvar a = 10;");
    }
}
