use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use anyhow::Context;

const REF_PREFIX: &str = "refs/heads/";

/// Validated branch name, usable as a path segment under `refs/heads/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("branch name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid branch name: {}", name);
        } else {
            Ok(Self(name))
        }
    }

    /// Extract the branch name from a `refs/heads/<name>` ref path
    pub fn try_parse_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        if !ref_path.starts_with(REF_PREFIX) {
            anyhow::bail!(
                "symbolic ref must start with '{}', got '{}'",
                REF_PREFIX,
                ref_path
            );
        }

        Self::try_parse(ref_path.trim_start_matches(REF_PREFIX).to_string())
    }

    pub fn as_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
