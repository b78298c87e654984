//! Thin wrapper over a wiki's git repository
//!
//! Only local operations live here. Fetching and pushing need credentials and
//! a network, which the shell leaves to the user's own git tooling.

use std::path::Path;

use git2::{ErrorCode, IndexAddOption, Signature, StatusOptions};
use tracing::debug;

use crate::error::{WikiError, WikiResult};

/// Author identity written into a wiki's local git config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl GitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    pub fn open(path: &Path) -> WikiResult<Self> {
        Ok(Self {
            repo: git2::Repository::open(path)?,
        })
    }

    /// Initializes a repository and records `identity` in its local config
    pub fn init(path: &Path, identity: &GitIdentity) -> WikiResult<Self> {
        let repo = Self {
            repo: git2::Repository::init(path)?,
        };
        repo.set_user_config(identity)?;
        Ok(repo)
    }

    pub fn has_remote_repo(&self) -> WikiResult<bool> {
        Ok(!self.repo.remotes()?.is_empty())
    }

    /// Adds the remote, or points an existing one at `url`
    pub fn set_remote(&self, name: &str, url: &str) -> WikiResult<()> {
        match self.repo.find_remote(name) {
            Ok(_) => self.repo.remote_set_url(name, url)?,
            Err(e) if e.code() == ErrorCode::NotFound => {
                self.repo.remote(name, url)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    pub fn remote_url(&self, name: &str) -> WikiResult<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_user_config(&self, identity: &GitIdentity) -> WikiResult<()> {
        let mut config = self.repo.config()?;
        config.set_str("user.name", &identity.name)?;
        config.set_str("user.email", &identity.email)?;
        Ok(())
    }

    /// Identity from the repository's own config, ignoring global settings
    pub fn user_config(&self) -> WikiResult<Option<GitIdentity>> {
        let config = self.repo.config()?.open_level(git2::ConfigLevel::Local)?;
        let entry = |key: &str| match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(WikiError::from(e)),
        };
        Ok(match (entry("user.name")?, entry("user.email")?) {
            (Some(name), Some(email)) => Some(GitIdentity { name, email }),
            _ => None,
        })
    }

    /// Whether the working tree differs from HEAD, untracked files included
    pub fn has_uncommitted_changes(&self) -> WikiResult<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    /// Stages every change, deletions included, and commits it on HEAD
    ///
    /// Returns the new commit id.
    pub fn commit_all(&self, message: &str) -> WikiResult<String> {
        if !self.has_uncommitted_changes()? {
            return Err(WikiError::NothingToCommit);
        }

        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        debug!(commit = %oid, "committed wiki changes");
        Ok(oid.to_string())
    }

    fn signature(&self) -> WikiResult<Signature<'static>> {
        match self.user_config()? {
            Some(identity) => Ok(Signature::now(&identity.name, &identity.email)?),
            None => Ok(self.repo.signature()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn identity() -> GitIdentity {
        GitIdentity::new("Wiki Author", "author@example.com")
    }

    #[test]
    fn test_init_records_identity() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), &identity()).unwrap();
        assert_eq!(repo.user_config().unwrap(), Some(identity()));
        assert!(!repo.has_remote_repo().unwrap());
    }

    #[test]
    fn test_remote_set_and_update() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), &identity()).unwrap();
        assert_eq!(repo.remote_url("origin").unwrap(), None);

        repo.set_remote("origin", "https://example.com/a.git").unwrap();
        repo.set_remote("origin", "https://example.com/b.git").unwrap();

        assert!(repo.has_remote_repo().unwrap());
        assert_eq!(
            repo.remote_url("origin").unwrap().as_deref(),
            Some("https://example.com/b.git")
        );
    }

    #[test]
    fn test_commit_all_clears_changes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), &identity()).unwrap();
        assert!(!repo.has_uncommitted_changes().unwrap());

        fs::create_dir(dir.path().join("daily")).unwrap();
        fs::write(dir.path().join("daily/today.md"), "# Today").unwrap();
        assert!(repo.has_uncommitted_changes().unwrap());

        let first = repo.commit_all("first").unwrap();
        assert!(!repo.has_uncommitted_changes().unwrap());

        fs::remove_file(dir.path().join("daily/today.md")).unwrap();
        let second = repo.commit_all("remove").unwrap();
        assert_ne!(first, second);
        assert!(!repo.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_commit_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), &identity()).unwrap();
        assert!(matches!(
            repo.commit_all("empty"),
            Err(WikiError::NothingToCommit)
        ));
    }
}
