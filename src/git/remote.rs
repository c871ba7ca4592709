use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot determine owner/repo from remote URL '{url}': expected something like git@github.com:owner/repo.git")]
pub struct RemoteUrlError {
    pub url: String,
}

/// Repository identity in "owner/name" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Parse the owner/name pair out of a remote URL.
    ///
    /// The identifier is the text between the last `:` and the trailing `.git`,
    /// e.g. `git@github.com:octo/widgets.git` yields `octo/widgets`.
    pub fn parse(url: &str) -> Result<Self, RemoteUrlError> {
        let invalid = || RemoteUrlError {
            url: url.to_string(),
        };

        let trimmed = url.trim();
        let without_suffix = trimmed.strip_suffix(".git").ok_or_else(invalid)?;
        let (_, path) = without_suffix.rsplit_once(':').ok_or_else(invalid)?;

        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_remote() {
        let repo = RepoId::parse("git@github.com:octo/widgets.git").unwrap();
        assert_eq!(repo.owner, "octo");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "octo/widgets");
    }

    #[test]
    fn test_parse_trims_trailing_newline() {
        let repo = RepoId::parse("git@github.com:octo/widgets.git\n").unwrap();
        assert_eq!(repo.to_string(), "octo/widgets");
    }

    #[test]
    fn test_parse_uses_last_colon() {
        let repo = RepoId::parse("ssh://git@host:2222:team/service.git").unwrap();
        assert_eq!(repo.to_string(), "team/service");
    }

    #[test]
    fn test_parse_keeps_dots_in_repo_name() {
        let repo = RepoId::parse("git@github.com:octo/widgets.rs.git").unwrap();
        assert_eq!(repo.name, "widgets.rs");
    }

    #[test]
    fn test_parse_rejects_missing_git_suffix() {
        assert!(RepoId::parse("git@github.com:octo/widgets").is_err());
    }

    #[test]
    fn test_parse_rejects_https_remote() {
        // Text after the last ':' is "//github.com/octo/widgets", not owner/name
        let err = RepoId::parse("https://github.com/octo/widgets.git").unwrap_err();
        assert_eq!(err.url, "https://github.com/octo/widgets.git");
    }

    #[test]
    fn test_parse_rejects_missing_colon_or_parts() {
        assert!(RepoId::parse("octo/widgets.git").is_err());
        assert!(RepoId::parse("git@github.com:widgets.git").is_err());
        assert!(RepoId::parse("git@github.com:/widgets.git").is_err());
        assert!(RepoId::parse("git@github.com:octo/.git").is_err());
        assert!(RepoId::parse("").is_err());
    }
}
