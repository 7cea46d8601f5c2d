use crate::error::{GitGuardError, Result};
use git2::Oid;

/// One ref update from the pre-push hook's input stream.
///
/// git feeds the hook one line per ref being pushed:
/// `<local ref> <local sha1> <remote ref> <remote sha1>`. The all-zero
/// sha is a sentinel: as the remote commit it marks a branch creation,
/// as the local commit a branch deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    pub local_ref: String,
    pub local_commit: Oid,
    pub remote_ref: String,
    pub remote_commit: Oid,
}

impl RefUpdate {
    /// Parses a single pre-push input line.
    pub fn parse(line: &str) -> Result<RefUpdate> {
        let mut fields = line.split_whitespace();
        let (local_ref, local_sha, remote_ref, remote_sha) = match (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => {
                return Err(GitGuardError::ref_update(format!(
                    "expected '<local ref> <sha> <remote ref> <sha>', got: {:?}",
                    line
                )))
            }
        };
        if fields.next().is_some() {
            return Err(GitGuardError::ref_update(format!(
                "trailing fields in ref update line: {:?}",
                line
            )));
        }

        let local_commit = Oid::from_str(local_sha)
            .map_err(|e| GitGuardError::ref_update(format!("bad local sha {:?}: {}", local_sha, e)))?;
        let remote_commit = Oid::from_str(remote_sha).map_err(|e| {
            GitGuardError::ref_update(format!("bad remote sha {:?}: {}", remote_sha, e))
        })?;

        Ok(RefUpdate {
            local_ref: local_ref.to_string(),
            local_commit,
            remote_ref: remote_ref.to_string(),
            remote_commit,
        })
    }

    /// Parses the full pre-push input stream, ignoring blank lines.
    pub fn parse_all(input: &str) -> Result<Vec<RefUpdate>> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(RefUpdate::parse)
            .collect()
    }

    /// The branch name on the remote, if this update targets one.
    /// Tags, notes and other ref namespaces return `None`.
    pub fn remote_branch(&self) -> Option<&str> {
        self.remote_ref.strip_prefix("refs/heads/")
    }

    /// Whether this update creates a branch that does not yet exist on
    /// the remote (remote sha is the all-zero sentinel).
    pub fn creates_branch(&self) -> bool {
        self.remote_commit.is_zero()
    }

    /// Whether this update deletes the remote branch (local sha is the
    /// all-zero sentinel). Deletions introduce no commits.
    pub fn deletes_branch(&self) -> bool {
        self.local_commit.is_zero()
    }
}
