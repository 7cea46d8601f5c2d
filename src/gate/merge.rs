//! Merge gate (pre-merge-commit): merge commits may only land on
//! protected branches; everything else must rebase.

use crate::config::BranchesConfig;
use crate::domain::{classify, BranchClass};
use crate::error::Result;
use crate::gate::{GateResult, Violation};
use crate::git::Repository;

#[derive(Debug, Clone)]
pub struct MergeContext {
    branch: String,
    class: BranchClass,
}

impl MergeContext {
    pub fn new(branch: Option<&str>, branches: &BranchesConfig) -> Self {
        MergeContext {
            branch: branch.unwrap_or_default().to_string(),
            class: classify(branch, &branches.protected, &branches.prefixes),
        }
    }

    pub fn from_repo(repo: &dyn Repository, branches: &BranchesConfig) -> Result<Self> {
        let branch = repo.current_branch()?;
        Ok(MergeContext::new(branch.as_deref(), branches))
    }
}

/// Accepts on protected branches (pull requests are the sanctioned merge
/// path) and in detached state; rejects everywhere else regardless of
/// what is being merged.
pub fn evaluate(ctx: &MergeContext) -> GateResult {
    match ctx.class {
        BranchClass::Protected | BranchClass::Detached => GateResult::accept(),
        _ => GateResult::reject(Violation::MergeCommitForbidden {
            branch: ctx.branch.clone(),
        }),
    }
}
