//! Remote repository references.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An `(owner, name)` pair naming the git-hosted configuration repository.
///
/// Parsed from the `"<owner>/<repo>"` form used in configuration. Immutable
/// for the duration of one sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidRepoRef {
            value: value.to_string(),
        };
        let (owner, name) = value.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty()
            || name.is_empty()
            || name.contains('/')
            || owner.chars().any(char::is_whitespace)
            || name.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where the configuration repository lives.
///
/// The hosted variant builds a git-over-HTTPS URL with the credential
/// embedded as basic-auth; the literal variant is used for self-hosted
/// remotes and by tests, where the URL (or local path) is taken as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSpec {
    GitHub(RepoRef),
    Url(String),
}

impl RemoteSpec {
    /// The URL to configure `origin` with.
    ///
    /// The returned string contains the secret for the hosted variant and
    /// must never be logged or surfaced unscrubbed.
    pub fn authenticated_url(&self, secret: &str) -> String {
        match self {
            Self::GitHub(repo) => {
                format!(
                    "https://{}@github.com/{}/{}",
                    secret,
                    repo.owner(),
                    repo.name()
                )
            }
            Self::Url(url) => url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_owner_repo() {
        let repo: RepoRef = "octocat/dotfiles".parse().unwrap();
        assert_eq!(repo.owner(), "octocat");
        assert_eq!(repo.name(), "dotfiles");
        assert_eq!(repo.to_string(), "octocat/dotfiles");
    }

    #[rstest]
    #[case("")]
    #[case("no-separator")]
    #[case("/repo")]
    #[case("owner/")]
    #[case("owner/repo/extra")]
    #[case("owner /repo")]
    fn test_parse_rejects_malformed(#[case] value: &str) {
        let err = value.parse::<RepoRef>().unwrap_err();
        assert!(matches!(err, Error::InvalidRepoRef { .. }));
    }

    #[test]
    fn test_github_url_embeds_credential() {
        let repo: RepoRef = "octocat/dotfiles".parse().unwrap();
        let url = RemoteSpec::GitHub(repo).authenticated_url("ghp_secret");
        assert_eq!(url, "https://ghp_secret@github.com/octocat/dotfiles");
    }

    #[test]
    fn test_literal_url_is_taken_as_is() {
        let spec = RemoteSpec::Url("/tmp/remote.git".to_string());
        assert_eq!(spec.authenticated_url("ignored"), "/tmp/remote.git");
    }
}
