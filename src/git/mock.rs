use crate::error::Result;
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: Option<String>,
    merge_in_progress: bool,
    remote_branches: HashSet<(String, String)>,
    /// Commits introduced when pushing `local` over `known_remote`.
    ranges: HashMap<(Oid, Option<Oid>), Vec<CommitInfo>>,
}

impl MockRepository {
    /// Create a mock repository checked out on the given branch
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
            merge_in_progress: false,
            remote_branches: HashSet::new(),
            ranges: HashMap::new(),
        }
    }

    /// Create a mock repository in detached HEAD state
    pub fn detached() -> Self {
        MockRepository {
            branch: None,
            merge_in_progress: false,
            remote_branches: HashSet::new(),
            ranges: HashMap::new(),
        }
    }

    /// Mark a merge as in progress
    pub fn set_merge_in_progress(&mut self, in_progress: bool) {
        self.merge_in_progress = in_progress;
    }

    /// Register a branch as existing on a remote
    pub fn add_remote_branch(&mut self, remote: impl Into<String>, branch: impl Into<String>) {
        self.remote_branches.insert((remote.into(), branch.into()));
    }

    /// Register the commits introduced by a push range
    pub fn add_range(&mut self, local: Oid, known_remote: Option<Oid>, commits: Vec<CommitInfo>) {
        self.ranges.insert((local, known_remote), commits);
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn merge_in_progress(&self) -> Result<bool> {
        Ok(self.merge_in_progress)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        Ok(self
            .remote_branches
            .contains(&(remote.to_string(), branch.to_string())))
    }

    fn commits_introduced(
        &self,
        local: Oid,
        known_remote: Option<Oid>,
    ) -> Result<Vec<CommitInfo>> {
        Ok(self
            .ranges
            .get(&(local, known_remote))
            .cloned()
            .unwrap_or_default())
    }
}
