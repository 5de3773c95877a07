use crate::artifacts::branch::branch_name::BranchName;

/// How a working-tree file disagrees with what would be committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn as_suffix(&self) -> &str {
        match self {
            ChangeKind::Modified => "(modified)",
            ChangeKind::Deleted => "(delete)",
        }
    }
}

/// One entry of the "not staged" section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub kind: ChangeKind,
}

impl std::fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.kind.as_suffix())
    }
}

/// Full snapshot comparison, ready for rendering
///
/// All sections are sorted lexicographically by path or branch name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusReport {
    pub branches: Vec<BranchName>,
    pub current_branch: BranchName,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub not_staged: Vec<ChangedFile>,
    pub untracked: Vec<String>,
}
