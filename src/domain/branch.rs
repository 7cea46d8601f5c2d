/// Classification of a branch name under the naming policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchClass {
    /// Exact match against the protected set (e.g. `main`, `develop`).
    Protected,
    /// `<prefix>/<description>` with a prefix from the allow-list.
    /// Carries the matched prefix.
    Conventional(String),
    /// Neither protected nor conventionally named.
    Invalid,
    /// No symbolic branch name (detached HEAD). Every gate treats this
    /// as an unconditional no-op accept.
    Detached,
}

impl BranchClass {
    pub fn is_protected(&self) -> bool {
        matches!(self, BranchClass::Protected)
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, BranchClass::Detached)
    }
}

/// Classifies a branch name against the configured policy.
///
/// `branch` is `None` for a detached HEAD. Protected comparison is exact
/// and case-sensitive. Prefixes are tried in declared order and the first
/// match wins; `feat/` alone (empty description) does not count as a
/// conventional name.
///
/// Total and deterministic: every input maps to exactly one class.
pub fn classify(branch: Option<&str>, protected: &[String], prefixes: &[String]) -> BranchClass {
    let name = match branch {
        Some(name) => name,
        None => return BranchClass::Detached,
    };

    if protected.iter().any(|p| p == name) {
        return BranchClass::Protected;
    }

    for prefix in prefixes {
        if let Some(rest) = name.strip_prefix(prefix.as_str()) {
            if let Some(description) = rest.strip_prefix('/') {
                if !description.is_empty() {
                    return BranchClass::Conventional(prefix.clone());
                }
            }
        }
    }

    BranchClass::Invalid
}
