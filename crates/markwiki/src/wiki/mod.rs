//! Wiki storage
//!
//! Every wiki is a git repository directly under one storage directory, named
//! after the directory. The store lists, creates and deletes wikis and reads and
//! writes their markdown documents. [`ViewData`] turns an activation into what
//! the activated view displays.

mod data;
pub mod git;
mod tree;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{WikiError, WikiResult};

pub use data::{ViewData, WikiStatus};
pub use git::{GitIdentity, Repository};
pub use tree::{build_file_tree, FileNode};

/// A wiki found in the storage directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wiki {
    pub name: String,
    pub has_remote_repo: bool,
    pub path: PathBuf,
}

/// The storage directory holding every wiki
#[derive(Debug, Clone)]
pub struct WikiStore {
    root: PathBuf,
}

impl WikiStore {
    /// Opens the storage directory, creating it if needed
    pub fn open(root: impl Into<PathBuf>) -> WikiResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "wiki store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Wikis in the storage directory, sorted by name
    ///
    /// Entries that are not directories or not git repositories are skipped.
    pub fn list(&self) -> WikiResult<Vec<Wiki>> {
        let mut wikis = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match self.get(name) {
                Ok(wiki) => wikis.push(wiki),
                Err(e) => debug!(wiki = name, error = %e, "skipping storage entry"),
            }
        }
        wikis.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(wikis)
    }

    /// Opens a wiki by name
    pub fn get(&self, name: &str) -> WikiResult<Wiki> {
        let path = self.wiki_dir(name)?;
        if !path.is_dir() {
            return Err(WikiError::NotFound(name.to_string()));
        }
        let repo =
            Repository::open(&path).map_err(|_| WikiError::NotARepository(name.to_string()))?;

        Ok(Wiki {
            name: name.to_string(),
            has_remote_repo: repo.has_remote_repo().unwrap_or(false),
            path,
        })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Creates an empty wiki backed by a fresh git repository
    ///
    /// The directory is removed again if the repository can't be initialized.
    pub fn create_local(&self, name: &str, identity: &GitIdentity) -> WikiResult<Wiki> {
        let path = self.wiki_dir(name)?;
        if path.exists() {
            return Err(WikiError::AlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&path)?;
        if let Err(e) = Repository::init(&path, identity) {
            warn!(wiki = name, error = %e, "git init failed, removing wiki directory");
            fs::remove_dir_all(&path)?;
            return Err(e);
        }

        info!(wiki = name, "wiki created");
        Ok(Wiki {
            name: name.to_string(),
            has_remote_repo: false,
            path,
        })
    }

    /// Deletes a wiki and everything in it
    pub fn delete(&self, name: &str) -> WikiResult<()> {
        let path = self.wiki_dir(name)?;
        if !path.is_dir() {
            return Err(WikiError::NotFound(name.to_string()));
        }
        fs::remove_dir_all(&path)?;
        info!(wiki = name, "wiki deleted");
        Ok(())
    }

    pub fn repository(&self, name: &str) -> WikiResult<Repository> {
        let wiki = self.get(name)?;
        Repository::open(&wiki.path)
    }

    /// File tree of a wiki, root node named after the wiki
    pub fn file_tree(&self, name: &str) -> WikiResult<FileNode> {
        let wiki = self.get(name)?;
        build_file_tree(&wiki.path, &wiki.name)
    }

    /// Creates an empty markdown document under `parent`
    pub fn create_file(&self, name: &str, parent: &str, file_name: &str) -> WikiResult<PathBuf> {
        if !file_name.ends_with(".md") {
            return Err(WikiError::NotMarkdown(file_name.to_string()));
        }
        let path = self.entry_path(name, parent, file_name)?;
        if path.exists() {
            return Err(WikiError::FileExists(join_relative(parent, file_name)));
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::File::create(&path)?;
        debug!(wiki = name, path = %path.display(), "file created");
        Ok(path)
    }

    /// Creates a folder under `parent`
    pub fn create_folder(&self, name: &str, parent: &str, folder: &str) -> WikiResult<PathBuf> {
        let path = self.entry_path(name, parent, folder)?;
        if path.exists() {
            return Err(WikiError::FileExists(join_relative(parent, folder)));
        }
        fs::create_dir_all(&path)?;
        debug!(wiki = name, path = %path.display(), "folder created");
        Ok(path)
    }

    /// Contents of a document, addressed like the editor route's `filePath`
    pub fn read_file(&self, name: &str, file_path: &str) -> WikiResult<String> {
        let path = self.document_path(name, file_path)?;
        if !path.is_file() {
            return Err(WikiError::FileNotFound(file_path.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Writes a document, creating missing parent folders
    pub fn save_file(&self, name: &str, file_path: &str, content: &str) -> WikiResult<()> {
        let path = self.document_path(name, file_path)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, content)?;
        debug!(wiki = name, file_path, bytes = content.len(), "file saved");
        Ok(())
    }

    fn wiki_dir(&self, name: &str) -> WikiResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    fn entry_path(&self, name: &str, parent: &str, entry: &str) -> WikiResult<PathBuf> {
        validate_entry_name(entry)?;
        let wiki = self.get(name)?;
        Ok(resolve_relative(&wiki.path, parent)?.join(entry))
    }

    fn document_path(&self, name: &str, file_path: &str) -> WikiResult<PathBuf> {
        let wiki = self.get(name)?;
        let path = resolve_relative(&wiki.path, file_path)?;
        if path == wiki.path {
            return Err(WikiError::InvalidPath(file_path.to_string()));
        }
        Ok(path)
    }
}

fn validate_name(name: &str) -> WikiResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(WikiError::InvalidName(name.to_string()))
    }
}

fn validate_entry_name(entry: &str) -> WikiResult<()> {
    let valid = !entry.is_empty()
        && entry != "."
        && entry != ".."
        && entry != ".git"
        && !entry.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(WikiError::InvalidPath(entry.to_string()))
    }
}

/// Joins a `/`-separated relative path onto `base`, refusing to leave it
fn resolve_relative(base: &Path, relative: &str) -> WikiResult<PathBuf> {
    let mut path = base.to_path_buf();
    for part in relative.split(['/', '\\']).filter(|p| !p.is_empty()) {
        match Path::new(part).components().next() {
            Some(Component::Normal(_)) if part != ".git" => path.push(part),
            Some(Component::CurDir) => {}
            _ => return Err(WikiError::InvalidPath(relative.to_string())),
        }
    }
    Ok(path)
}

fn join_relative(parent: &str, entry: &str) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        entry.to_string()
    } else {
        format!("{}/{}", parent, entry)
    }
}
