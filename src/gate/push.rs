//! Push gate (pre-push): per-ref policy checks plus a merge-commit scan
//! over the range each ref introduces.
//!
//! One bad ref never short-circuits the invocation; every tuple is
//! evaluated so a multi-branch push gets complete feedback.

use crate::config::Config;
use crate::domain::{classify, BranchClass, RefUpdate};
use crate::error::Result;
use crate::gate::{GateResult, Violation};
use crate::git::Repository;

/// Evaluates every ref update of one push invocation.
///
/// Tuples whose remote ref is outside `refs/heads/` (tags, notes) are
/// skipped: the policy only speaks about branches. Branch deletions
/// introduce no commits, so only the naming rules apply to them.
pub fn evaluate(
    updates: &[RefUpdate],
    repo: &dyn Repository,
    config: &Config,
) -> Result<GateResult> {
    let mut result = GateResult::accept();

    for update in updates {
        let branch = match update.remote_branch() {
            Some(branch) => branch,
            None => continue,
        };

        if let Some(violation) = check_update(update, branch, repo, config)? {
            result.violations.push(violation);
        }
    }

    Ok(result)
}

fn check_update(
    update: &RefUpdate,
    branch: &str,
    repo: &dyn Repository,
    config: &Config,
) -> Result<Option<Violation>> {
    match classify(
        Some(branch),
        &config.branches.protected,
        &config.branches.prefixes,
    ) {
        BranchClass::Protected => {
            return Ok(Some(Violation::ProtectedBranchPushForbidden {
                branch: branch.to_string(),
            }))
        }
        BranchClass::Invalid => {
            return Ok(Some(Violation::InvalidBranchName {
                branch: branch.to_string(),
                prefixes: config.branches.prefixes.clone(),
            }))
        }
        BranchClass::Conventional(_) | BranchClass::Detached => {}
    }

    if update.deletes_branch() {
        return Ok(None);
    }

    let known_remote = if update.creates_branch() {
        None
    } else {
        Some(update.remote_commit)
    };
    let range = repo.commits_introduced(update.local_commit, known_remote)?;

    let merges: Vec<&crate::git::CommitInfo> = range.iter().filter(|c| c.is_merge).collect();
    if merges.is_empty() {
        return Ok(None);
    }

    let shown = merges
        .iter()
        .take(config.push.merge_report_cap)
        .map(|c| format!("{:.7} {}", c.id, c.summary))
        .collect();

    Ok(Some(Violation::MergeCommitInRange {
        branch: branch.to_string(),
        shown,
        total: merges.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{CommitInfo, MockRepository};
    use git2::Oid;

    const ZERO: &str = "0000000000000000000000000000000000000000";

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn update(branch: &str, local: Oid, remote: Oid) -> RefUpdate {
        RefUpdate::parse(&format!(
            "refs/heads/{} {} refs/heads/{} {}",
            branch, local, branch, remote
        ))
        .unwrap()
    }

    fn commit(byte: u8, summary: &str, is_merge: bool) -> CommitInfo {
        CommitInfo {
            id: oid(byte).to_string(),
            summary: summary.to_string(),
            is_merge,
        }
    }

    #[test]
    fn test_rejects_push_to_protected_branch() {
        let repo = MockRepository::on_branch("main");
        let updates = vec![update("main", oid(1), oid(2))];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert_eq!(
            result.violations,
            vec![Violation::ProtectedBranchPushForbidden {
                branch: "main".to_string()
            }]
        );
    }

    #[test]
    fn test_rejects_push_to_invalid_branch() {
        let repo = MockRepository::on_branch("feat/x");
        let updates = vec![update("random-name", oid(1), oid(2))];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::InvalidBranchName { branch, .. }] if branch == "random-name"
        ));
    }

    #[test]
    fn test_accepts_clean_conventional_push() {
        let mut repo = MockRepository::on_branch("feat/x");
        repo.add_range(
            oid(1),
            Some(oid(2)),
            vec![commit(1, "feat: add x", false)],
        );
        let updates = vec![update("feat/x", oid(1), oid(2))];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_rejects_merge_commit_in_range() {
        let mut repo = MockRepository::on_branch("feat/x");
        repo.add_range(
            oid(1),
            Some(oid(2)),
            vec![
                commit(3, "feat: add x", false),
                commit(4, "Merge branch 'develop' into feat/x", true),
            ],
        );
        let updates = vec![update("feat/x", oid(1), oid(2))];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        match result.violations.as_slice() {
            [Violation::MergeCommitInRange { branch, shown, total }] => {
                assert_eq!(branch, "feat/x");
                assert_eq!(*total, 1);
                assert!(shown[0].contains("Merge branch 'develop'"));
            }
            other => panic!("unexpected violations: {:?}", other),
        }
    }

    #[test]
    fn test_new_branch_scans_all_ancestors() {
        let mut repo = MockRepository::on_branch("feat/x");
        // Range registered under known_remote = None, the new-branch form
        repo.add_range(oid(1), None, vec![commit(4, "Merge old work", true)]);

        let line = format!("refs/heads/feat/x {} refs/heads/feat/x {}", oid(1), ZERO);
        let updates = vec![RefUpdate::parse(&line).unwrap()];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert!(!result.passed());
    }

    #[test]
    fn test_branch_deletion_skips_range_scan() {
        let repo = MockRepository::on_branch("feat/x");
        let line = format!("(delete) {} refs/heads/feat/x {}", ZERO, oid(2));
        let updates = vec![RefUpdate::parse(&line).unwrap()];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_non_branch_refs_are_skipped() {
        let repo = MockRepository::on_branch("feat/x");
        let line = format!("refs/tags/v1.0.0 {} refs/tags/v1.0.0 {}", oid(1), ZERO);
        let updates = vec![RefUpdate::parse(&line).unwrap()];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_all_tuples_are_evaluated() {
        // Protected ref rejects but the conventional ref is still checked
        let mut repo = MockRepository::on_branch("feat/y");
        repo.add_range(
            oid(3),
            Some(oid(4)),
            vec![commit(5, "feat: add y", false)],
        );
        let updates = vec![
            update("main", oid(1), oid(2)),
            update("feat/y", oid(3), oid(4)),
        ];

        let result = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(matches!(
            &result.violations[0],
            Violation::ProtectedBranchPushForbidden { branch } if branch == "main"
        ));
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_merge_report_is_capped() {
        let mut config = Config::default();
        config.push.merge_report_cap = 2;

        let mut repo = MockRepository::on_branch("feat/x");
        let merges: Vec<CommitInfo> = (10..15)
            .map(|b| commit(b, "Merge something", true))
            .collect();
        repo.add_range(oid(1), Some(oid(2)), merges);
        let updates = vec![update("feat/x", oid(1), oid(2))];

        let result = evaluate(&updates, &repo, &config).unwrap();
        match result.violations.as_slice() {
            [Violation::MergeCommitInRange { shown, total, .. }] => {
                assert_eq!(shown.len(), 2);
                assert_eq!(*total, 5);
            }
            other => panic!("unexpected violations: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_evaluation_is_deterministic() {
        let mut repo = MockRepository::on_branch("feat/x");
        repo.add_range(
            oid(1),
            Some(oid(2)),
            vec![commit(3, "feat: add x", false)],
        );
        let updates = vec![update("feat/x", oid(1), oid(2))];

        let first = evaluate(&updates, &repo, &Config::default()).unwrap();
        let second = evaluate(&updates, &repo, &Config::default()).unwrap();
        assert_eq!(first, second);
        assert!(first.passed());
    }
}
