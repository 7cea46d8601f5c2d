//! The five policy gates and their shared verdict types.
//!
//! Each gate is an ordered pipeline of pure rules over an explicit
//! context struct. A rule returns `Some(Violation)` to reject, which is
//! terminal for the gate; `None` falls through to the next rule; an
//! empty pipeline accepts. Evaluation is deterministic given its context,
//! so a failing gate fails identically until the input changes.

pub mod checkout;
pub mod commit;
pub mod merge;
pub mod message;
pub mod push;

use std::fmt;

/// Fatal policy violations. Each rendering names the violated rule and
/// the remediation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Direct commit attempted on a protected branch
    ProtectedBranchViolation { branch: String },
    /// Branch name is neither protected nor conventionally named
    InvalidBranchName { branch: String, prefixes: Vec<String> },
    /// Merge metadata present on a non-protected branch at commit time
    UnmergedMergeInProgress { branch: String },
    /// The formatter rewrote files; the user must re-stage
    FormattingApplied { detail: String },
    /// Commit message does not match the conventional grammar
    InvalidCommitMessage { subject: String, types: Vec<String> },
    /// Merge commit attempted outside a protected branch
    MergeCommitForbidden { branch: String },
    /// Pushed range contains merge commits
    MergeCommitInRange {
        branch: String,
        /// Offending commit lines, capped by configuration
        shown: Vec<String>,
        /// Total merge commits found in the range
        total: usize,
    },
    /// Push targets a protected branch
    ProtectedBranchPushForbidden { branch: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ProtectedBranchViolation { branch } => {
                write!(
                    f,
                    "Direct commits to protected branch '{}' are not allowed.\n  \
                     Create a feature branch first: git switch -c <prefix>/<description>",
                    branch
                )
            }
            Violation::InvalidBranchName { branch, prefixes } => {
                write!(
                    f,
                    "Branch '{}' does not follow the naming policy.\n  \
                     Use <prefix>/<description> with one of: {}\n  \
                     Rename this branch with: git branch -m <prefix>/<description>",
                    branch,
                    prefixes.join(", ")
                )
            }
            Violation::UnmergedMergeInProgress { branch } => {
                write!(
                    f,
                    "A merge is in progress on non-protected branch '{}'.\n  \
                     Merge commits may only land on protected branches; run \
                     'git merge --abort' and rebase instead.",
                    branch
                )
            }
            Violation::FormattingApplied { detail } => {
                write!(
                    f,
                    "Source files were reformatted: {}\n  \
                     Review the changes, re-stage them, and commit again.",
                    detail
                )
            }
            Violation::InvalidCommitMessage { subject, types } => {
                write!(
                    f,
                    "Commit message '{}' does not follow 'type(scope): subject'.\n  \
                     Valid types: {}\n  \
                     Examples:\n    \
                     feat(parser): add range scan\n    \
                     fix: handle empty input",
                    subject,
                    types.join(", ")
                )
            }
            Violation::MergeCommitForbidden { branch } => {
                write!(
                    f,
                    "Merge commits are not allowed on branch '{}'.\n  \
                     Merges land on protected branches via pull request; update \
                     this branch with 'git pull --rebase' instead.",
                    branch
                )
            }
            Violation::MergeCommitInRange {
                branch,
                shown,
                total,
            } => {
                writeln!(
                    f,
                    "Push to '{}' would introduce {} merge commit(s):",
                    branch, total
                )?;
                for line in shown {
                    writeln!(f, "    {}", line)?;
                }
                if *total > shown.len() {
                    writeln!(f, "    ... and {} more", total - shown.len())?;
                }
                write!(
                    f,
                    "  Rebase the branch to linearize it before pushing: git rebase"
                )
            }
            Violation::ProtectedBranchPushForbidden { branch } => {
                write!(
                    f,
                    "Direct pushes to protected branch '{}' are not allowed.\n  \
                     Push a feature branch and open a pull request instead.",
                    branch
                )
            }
        }
    }
}

/// Non-fatal advisories: printed as warnings, never change the exit code.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Checked out a protected branch
    ProtectedBranchWarning { branch: String },
    /// Checked out a pre-policy branch grandfathered by its remote presence
    NonConventionalRemoteBranchWarning { branch: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ProtectedBranchWarning { branch } => {
                write!(
                    f,
                    "You are on protected branch '{}'; direct commits here will be rejected.",
                    branch
                )
            }
            Advisory::NonConventionalRemoteBranchWarning { branch } => {
                write!(
                    f,
                    "Branch '{}' predates the naming policy (it exists on the remote). \
                     Checkout allowed; new branches must use <prefix>/<description>.",
                    branch
                )
            }
        }
    }
}

/// Outcome of one gate invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GateResult {
    pub violations: Vec<Violation>,
    pub advisories: Vec<Advisory>,
}

impl GateResult {
    pub fn accept() -> Self {
        GateResult::default()
    }

    pub fn reject(violation: Violation) -> Self {
        GateResult {
            violations: vec![violation],
            advisories: Vec::new(),
        }
    }

    pub fn warn(advisory: Advisory) -> Self {
        GateResult {
            violations: Vec::new(),
            advisories: vec![advisory],
        }
    }

    /// Whether the git operation may proceed.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Hook exit code: 0 to proceed, 1 to abort.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Runs an ordered rule pipeline: the first rejecting rule is terminal.
pub(crate) fn run_rules<C>(rules: &[fn(&C) -> Option<Violation>], ctx: &C) -> Option<Violation> {
    rules.iter().find_map(|rule| rule(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline_accepts() {
        let rules: &[fn(&()) -> Option<Violation>] = &[];
        assert_eq!(run_rules(rules, &()), None);
    }

    #[test]
    fn test_first_rejection_is_terminal() {
        fn pass(_: &()) -> Option<Violation> {
            None
        }
        fn reject_a(_: &()) -> Option<Violation> {
            Some(Violation::ProtectedBranchViolation {
                branch: "a".to_string(),
            })
        }
        fn reject_b(_: &()) -> Option<Violation> {
            Some(Violation::ProtectedBranchViolation {
                branch: "b".to_string(),
            })
        }

        let rules: &[fn(&()) -> Option<Violation>] = &[pass, reject_a, reject_b];
        assert_eq!(
            run_rules(rules, &()),
            Some(Violation::ProtectedBranchViolation {
                branch: "a".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_message_rendering_lists_types_and_examples() {
        let v = Violation::InvalidCommitMessage {
            subject: "Added x".to_string(),
            types: vec!["feat".to_string(), "fix".to_string()],
        };
        let text = v.to_string();
        assert!(text.contains("feat, fix"));
        assert!(text.contains("feat(parser): add range scan"));
        assert!(text.contains("fix: handle empty input"));
    }

    #[test]
    fn test_merge_range_rendering_is_bounded() {
        let v = Violation::MergeCommitInRange {
            branch: "feat/x".to_string(),
            shown: vec!["abc1234 Merge branch 'develop'".to_string()],
            total: 5,
        };
        let text = v.to_string();
        assert!(text.contains("5 merge commit(s)"));
        assert!(text.contains("... and 4 more"));
    }

    #[test]
    fn test_gate_result_exit_codes() {
        assert_eq!(GateResult::accept().exit_code(), 0);
        assert_eq!(
            GateResult::warn(Advisory::ProtectedBranchWarning {
                branch: "main".to_string()
            })
            .exit_code(),
            0
        );
        assert_eq!(
            GateResult::reject(Violation::MergeCommitForbidden {
                branch: "feat/x".to_string()
            })
            .exit_code(),
            1
        );
    }
}
