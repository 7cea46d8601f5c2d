use crate::error::{GitGuardError, Result};
use crate::git::CommitInfo;
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, RepositoryState};
use std::path::Path;

/// Wrapper around git2::Repository implementing our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<Option<String>> {
        if self.repo.head_detached()? {
            return Ok(None);
        }

        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().map(|s| s.to_string())),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // Fresh repository: HEAD points at a branch with no
                // commits yet. The symbolic target still names it.
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(|s| s.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn merge_in_progress(&self) -> Result<bool> {
        Ok(self.repo.state() == RepositoryState::Merge)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        let tracking = format!("{}/{}", remote, branch);
        match self.repo.find_branch(&tracking, BranchType::Remote) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(GitGuardError::ref_update(format!(
                "Cannot look up remote branch '{}': {}",
                tracking, e
            ))),
        }
    }

    fn commits_introduced(
        &self,
        local: Oid,
        known_remote: Option<Oid>,
    ) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;

        revwalk.push(local)?;
        if let Some(remote) = known_remote {
            revwalk.hide(remote)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let summary = commit.summary().unwrap_or("(empty message)").to_string();

            commits.push(CommitInfo {
                id: oid.to_string(),
                summary,
                is_merge: commit.parent_count() > 1,
            });
        }

        commits.reverse();
        Ok(commits)
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
