//! File tree of a wiki, as shown by the workspace view

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WikiError, WikiResult};

/// A file or directory inside a wiki
///
/// `path` is relative to the wiki root with `/` separators, so a file node's
/// path is exactly the `filePath` the editor route expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub is_directory: bool,
    pub path: String,
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Depth-first search for a node by relative path
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        if self.path == path {
            return Some(self);
        }
        self.children
            .iter()
            .flatten()
            .find_map(|child| child.find(path))
    }

    /// Relative paths of every file below this node
    pub fn files(&self) -> Vec<&str> {
        match &self.children {
            None => vec![self.path.as_str()],
            Some(children) => children.iter().flat_map(FileNode::files).collect(),
        }
    }
}

/// Builds the tree rooted at `root`, naming the root node `name`
///
/// Directories sort before files, then by name. The `.git` directory is skipped.
pub fn build_file_tree(root: &Path, name: &str) -> WikiResult<FileNode> {
    build_node(root, name.to_string(), String::new())
}

fn build_node(path: &Path, name: String, relative: String) -> WikiResult<FileNode> {
    if !fs::metadata(path)?.is_dir() {
        return Ok(FileNode {
            name,
            is_directory: false,
            path: relative,
            children: None,
        });
    }

    let mut children = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let child_name = entry
            .file_name()
            .into_string()
            .map_err(|raw| WikiError::InvalidPath(raw.to_string_lossy().into_owned()))?;
        if child_name == ".git" {
            continue;
        }
        let child_relative = if relative.is_empty() {
            child_name.clone()
        } else {
            format!("{}/{}", relative, child_name)
        };
        children.push(build_node(&entry.path(), child_name, child_relative)?);
    }

    children.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(FileNode {
        name,
        is_directory: true,
        path: relative,
        children: Some(children),
    })
}
