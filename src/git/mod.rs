//! Git repository access behind a trait.
//!
//! The gates never query ambient git state themselves; they receive an
//! explicit context built through the [Repository] trait. That keeps rule
//! evaluation pure and lets every gate be unit tested against
//! [mock::MockRepository] without a real repository on disk.
//!
//! Concrete implementations:
//!
//! - [repository::Git2Repository]: the real implementation using `git2`
//! - [mock::MockRepository]: in-memory implementation for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit metadata needed by the push gate's merge scan.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// Full commit hash
    pub id: String,
    /// First line of the commit message
    pub summary: String,
    /// Whether the commit has more than one parent
    pub is_merge: bool,
}

/// Repository state consulted by the gates.
///
/// Remote-branch existence is answered from locally cached ref state
/// only; there is a documented staleness window against the actual
/// remote, which the checkout gate accepts by design.
pub trait Repository: Send + Sync {
    /// The current branch shorthand, or `None` for a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether a merge is in progress (MERGE_HEAD present).
    fn merge_in_progress(&self) -> Result<bool>;

    /// Whether `remote/branch` exists as a remote-tracking ref.
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool>;

    /// Commits reachable from `local` but not from `known_remote`,
    /// oldest first. `None` for `known_remote` means the remote branch
    /// does not exist yet and the range is all ancestors of `local`.
    fn commits_introduced(&self, local: Oid, known_remote: Option<Oid>)
        -> Result<Vec<CommitInfo>>;
}
