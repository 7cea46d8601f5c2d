//! The commit gate's optional formatting step.
//!
//! git-guard never rewrites source files itself; it delegates to the
//! project's canonical formatter through two configured commands. The
//! check command reports drift via its exit status, the apply command
//! fixes it in place. The pair must be a fixed point: immediately after
//! a successful apply, check passes.

use crate::config::FormatConfig;
use crate::error::{GitGuardError, Result};
use std::process::{Command, Output};

/// Result of one formatter pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatOutcome {
    /// The tree already conforms; nothing was touched.
    Clean,
    /// Files were rewritten; the commit must be re-staged. Carries a
    /// short human-readable description of what ran.
    Reformatted(String),
}

/// Seam for the formatting side effect, mockable in tests.
pub trait Formatter {
    fn run(&self) -> Result<FormatOutcome>;
}

/// Formatter driven by the configured shell commands.
pub struct CommandFormatter {
    check: String,
    apply: String,
}

impl CommandFormatter {
    pub fn new(config: &FormatConfig) -> Self {
        CommandFormatter {
            check: config.check.clone(),
            apply: config.apply.clone(),
        }
    }

    fn run_command(command: &str) -> Result<Output> {
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| GitGuardError::formatter(format!("Failed to run '{}': {}", command, e)))
    }
}

impl Formatter for CommandFormatter {
    fn run(&self) -> Result<FormatOutcome> {
        let check = Self::run_command(&self.check)?;
        if check.status.success() {
            return Ok(FormatOutcome::Clean);
        }

        let apply = Self::run_command(&self.apply)?;
        if !apply.status.success() {
            let stderr = String::from_utf8_lossy(&apply.stderr);
            return Err(GitGuardError::formatter(format!(
                "'{}' failed with exit code {}\nStderr: {}",
                self.apply,
                apply.status.code().unwrap_or(-1),
                stderr
            )));
        }

        Ok(FormatOutcome::Reformatted(format!("ran '{}'", self.apply)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(check: &str, apply: &str) -> CommandFormatter {
        CommandFormatter::new(&FormatConfig {
            check: check.to_string(),
            apply: apply.to_string(),
        })
    }

    #[test]
    fn test_clean_when_check_passes() {
        let outcome = formatter("true", "false").run().unwrap();
        assert_eq!(outcome, FormatOutcome::Clean);
    }

    #[test]
    fn test_reformatted_when_check_fails_and_apply_succeeds() {
        let outcome = formatter("false", "true").run().unwrap();
        assert!(matches!(outcome, FormatOutcome::Reformatted(_)));
    }

    #[test]
    fn test_error_when_apply_fails() {
        let result = formatter("false", "false").run();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exit code"));
    }

    #[test]
    fn test_missing_command_is_reported() {
        // sh -c itself runs, but the command inside fails with 127;
        // that reads as drift for check and as an error for apply.
        let result = formatter("false", "/nonexistent/formatter-binary").run();
        assert!(result.is_err());
    }
}
