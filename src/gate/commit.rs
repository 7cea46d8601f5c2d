//! Commit gate (pre-commit): branch policy checks before a commit is
//! recorded, plus the optional formatting step.

use crate::config::BranchesConfig;
use crate::domain::{classify, BranchClass};
use crate::error::Result;
use crate::fmt_check::{FormatOutcome, Formatter};
use crate::gate::{run_rules, GateResult, Violation};
use crate::git::Repository;

/// Everything the commit gate needs, captured up front so rule
/// evaluation never touches repository state.
#[derive(Debug, Clone)]
pub struct CommitContext {
    branch: String,
    class: BranchClass,
    merge_in_progress: bool,
    prefixes: Vec<String>,
}

impl CommitContext {
    pub fn new(branch: Option<&str>, merge_in_progress: bool, branches: &BranchesConfig) -> Self {
        CommitContext {
            branch: branch.unwrap_or_default().to_string(),
            class: classify(branch, &branches.protected, &branches.prefixes),
            merge_in_progress,
            prefixes: branches.prefixes.clone(),
        }
    }

    /// Captures the context from live repository state.
    pub fn from_repo(repo: &dyn Repository, branches: &BranchesConfig) -> Result<Self> {
        let branch = repo.current_branch()?;
        let merge_in_progress = repo.merge_in_progress()?;
        Ok(CommitContext::new(
            branch.as_deref(),
            merge_in_progress,
            branches,
        ))
    }
}

fn reject_protected(ctx: &CommitContext) -> Option<Violation> {
    ctx.class
        .is_protected()
        .then(|| Violation::ProtectedBranchViolation {
            branch: ctx.branch.clone(),
        })
}

fn reject_invalid_name(ctx: &CommitContext) -> Option<Violation> {
    matches!(ctx.class, BranchClass::Invalid).then(|| Violation::InvalidBranchName {
        branch: ctx.branch.clone(),
        prefixes: ctx.prefixes.clone(),
    })
}

fn reject_merge_in_progress(ctx: &CommitContext) -> Option<Violation> {
    // Merges reach protected branches through the merge gate; a merge
    // concluding on a feature branch via direct commit is never legal.
    ctx.merge_in_progress
        .then(|| Violation::UnmergedMergeInProgress {
            branch: ctx.branch.clone(),
        })
}

const RULES: &[fn(&CommitContext) -> Option<Violation>] = &[
    reject_protected,
    reject_invalid_name,
    reject_merge_in_progress,
];

/// Pure rule evaluation, without the formatting side effect.
pub fn evaluate(ctx: &CommitContext) -> GateResult {
    if ctx.class.is_detached() {
        return GateResult::accept();
    }

    match run_rules(RULES, ctx) {
        Some(violation) => GateResult::reject(violation),
        None => GateResult::accept(),
    }
}

/// Full gate run: rules first, then the formatting step when configured.
///
/// A reformat rejects the commit so the user can re-stage; the next run
/// finds a clean tree and passes (fixed point).
pub fn run(ctx: &CommitContext, formatter: Option<&dyn Formatter>) -> Result<GateResult> {
    let result = evaluate(ctx);
    if !result.passed() || ctx.class.is_detached() {
        return Ok(result);
    }

    if let Some(formatter) = formatter {
        if let FormatOutcome::Reformatted(detail) = formatter.run()? {
            return Ok(GateResult::reject(Violation::FormattingApplied { detail }));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFormatter(FormatOutcome);

    impl Formatter for FixedFormatter {
        fn run(&self) -> Result<FormatOutcome> {
            Ok(self.0.clone())
        }
    }

    fn ctx(branch: Option<&str>, merge_in_progress: bool) -> CommitContext {
        CommitContext::new(branch, merge_in_progress, &BranchesConfig::default())
    }

    #[test]
    fn test_rejects_commit_on_protected_branch() {
        let result = evaluate(&ctx(Some("main"), false));
        assert_eq!(
            result.violations,
            vec![Violation::ProtectedBranchViolation {
                branch: "main".to_string()
            }]
        );
    }

    #[test]
    fn test_rejects_commit_on_invalid_branch() {
        let result = evaluate(&ctx(Some("random-name"), false));
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::InvalidBranchName { branch, .. }] if branch == "random-name"
        ));
    }

    #[test]
    fn test_rejects_merge_in_progress_on_feature_branch() {
        let result = evaluate(&ctx(Some("feat/x"), true));
        assert_eq!(
            result.violations,
            vec![Violation::UnmergedMergeInProgress {
                branch: "feat/x".to_string()
            }]
        );
    }

    #[test]
    fn test_protected_outranks_merge_in_progress() {
        // Fixed rule order: the protected check fires first even when a
        // merge is also in progress.
        let result = evaluate(&ctx(Some("main"), true));
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::ProtectedBranchViolation { .. }]
        ));
    }

    #[test]
    fn test_accepts_conventional_branch() {
        assert!(evaluate(&ctx(Some("feat/x"), false)).passed());
    }

    #[test]
    fn test_detached_head_is_a_no_op() {
        assert!(evaluate(&ctx(None, true)).passed());
    }

    #[test]
    fn test_detached_head_skips_formatter() {
        let formatter = FixedFormatter(FormatOutcome::Reformatted("ran fmt".to_string()));
        let result = run(&ctx(None, false), Some(&formatter)).unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_formatter_drift_rejects() {
        let formatter = FixedFormatter(FormatOutcome::Reformatted("ran fmt".to_string()));
        let result = run(&ctx(Some("feat/x"), false), Some(&formatter)).unwrap();
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::FormattingApplied { .. }]
        ));
    }

    #[test]
    fn test_formatter_clean_accepts() {
        let formatter = FixedFormatter(FormatOutcome::Clean);
        let result = run(&ctx(Some("feat/x"), false), Some(&formatter)).unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_rule_rejection_precedes_formatter() {
        let formatter = FixedFormatter(FormatOutcome::Reformatted("ran fmt".to_string()));
        let result = run(&ctx(Some("main"), false), Some(&formatter)).unwrap();
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::ProtectedBranchViolation { .. }]
        ));
    }
}
