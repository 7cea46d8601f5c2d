//! Checkout gate (post-checkout): advisory for protected and
//! grandfathered branches, fatal only for newly invalid names.

use crate::config::Config;
use crate::domain::{classify, BranchClass};
use crate::error::{GitGuardError, Result};
use crate::gate::{Advisory, GateResult, Violation};
use crate::git::Repository;

/// What kind of checkout the hook observed, from its third argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    /// Branch checkout (`1`): the gate applies.
    Branch,
    /// File checkout (`0`): ignored entirely.
    File,
}

impl CheckoutKind {
    pub fn from_flag(flag: &str) -> Result<CheckoutKind> {
        match flag {
            "1" => Ok(CheckoutKind::Branch),
            "0" => Ok(CheckoutKind::File),
            other => Err(GitGuardError::config(format!(
                "post-checkout flag must be 0 or 1, got {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutContext {
    kind: CheckoutKind,
    branch: String,
    class: BranchClass,
    exists_on_remote: bool,
    prefixes: Vec<String>,
}

impl CheckoutContext {
    pub fn new(
        kind: CheckoutKind,
        branch: Option<&str>,
        exists_on_remote: bool,
        config: &Config,
    ) -> Self {
        CheckoutContext {
            kind,
            branch: branch.unwrap_or_default().to_string(),
            class: classify(branch, &config.branches.protected, &config.branches.prefixes),
            exists_on_remote,
            prefixes: config.branches.prefixes.clone(),
        }
    }

    /// Captures the context from live repository state. The remote
    /// lookup consults locally cached refs only and is performed solely
    /// for invalid names, the one case where it changes the outcome.
    pub fn from_repo(kind: CheckoutKind, repo: &dyn Repository, config: &Config) -> Result<Self> {
        let branch = repo.current_branch()?;
        let class = classify(
            branch.as_deref(),
            &config.branches.protected,
            &config.branches.prefixes,
        );

        let exists_on_remote = match (&class, branch.as_deref()) {
            (BranchClass::Invalid, Some(name)) => {
                repo.remote_branch_exists(&config.push.remote, name)?
            }
            _ => false,
        };

        Ok(CheckoutContext {
            kind,
            branch: branch.unwrap_or_default(),
            class,
            exists_on_remote,
            prefixes: config.branches.prefixes.clone(),
        })
    }
}

/// The only gate where remote existence changes the outcome: branches
/// created before the policy existed are grandfathered with a warning.
pub fn evaluate(ctx: &CheckoutContext) -> GateResult {
    if ctx.kind == CheckoutKind::File {
        return GateResult::accept();
    }

    match ctx.class {
        BranchClass::Detached | BranchClass::Conventional(_) => GateResult::accept(),
        BranchClass::Protected => GateResult::warn(Advisory::ProtectedBranchWarning {
            branch: ctx.branch.clone(),
        }),
        BranchClass::Invalid => {
            if ctx.exists_on_remote {
                GateResult::warn(Advisory::NonConventionalRemoteBranchWarning {
                    branch: ctx.branch.clone(),
                })
            } else {
                GateResult::reject(Violation::InvalidBranchName {
                    branch: ctx.branch.clone(),
                    prefixes: ctx.prefixes.clone(),
                })
            }
        }
    }
}
