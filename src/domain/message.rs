use crate::config::CommitsConfig;
use crate::error::{GitGuardError, Result};
use regex::Regex;

/// Compiled conventional-commit grammar.
///
/// A message is conventional iff its subject line matches
/// `type(scope): subject` with `type` drawn from the configured allow-list,
/// an optional lowercase alphanumeric/hyphen scope, and a subject of at
/// most `subject_limit` characters. Messages whose subject starts with
/// `Merge` are exempt: git writes those itself for merge commits.
#[derive(Debug)]
pub struct MessageGrammar {
    pattern: Regex,
    types: Vec<String>,
}

impl MessageGrammar {
    /// Compiles the grammar from configuration.
    ///
    /// Fails only on degenerate configuration (empty type list or a zero
    /// subject limit), never at validation time.
    pub fn new(config: &CommitsConfig) -> Result<Self> {
        if config.types.is_empty() {
            return Err(GitGuardError::config("commits.types must not be empty"));
        }
        if config.subject_limit == 0 {
            return Err(GitGuardError::config("commits.subject_limit must be positive"));
        }

        let alternatives = config
            .types
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(
            r"^({})(\([a-z0-9-]+\))?: .{{1,{}}}$",
            alternatives, config.subject_limit
        );
        let pattern = Regex::new(&source)
            .map_err(|e| GitGuardError::config(format!("invalid commit grammar: {}", e)))?;

        Ok(MessageGrammar {
            pattern,
            types: config.types.clone(),
        })
    }

    /// The configured type tokens, for diagnostics.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Whether the subject line is exempt as a merge commit message.
    pub fn is_merge_subject(subject: &str) -> bool {
        subject.starts_with("Merge")
    }

    /// Validates a subject line against the grammar. Merge subjects pass
    /// unconditionally.
    pub fn matches(&self, subject: &str) -> bool {
        Self::is_merge_subject(subject) || self.pattern.is_match(subject)
    }

    /// Extracts the subject line from a draft commit message as git will
    /// record it: comment lines are stripped first, then the first
    /// remaining line is the subject. Empty if nothing remains.
    pub fn subject_of(message: &str) -> &str {
        message
            .lines()
            .find(|line| !line.starts_with('#'))
            .unwrap_or("")
    }
}
