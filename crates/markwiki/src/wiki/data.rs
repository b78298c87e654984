use serde::Serialize;

use super::{FileNode, Wiki, WikiStore};
use crate::app::Activation;
use crate::error::{WikiError, WikiResult};
use crate::views::{View, ViewProps};

/// A wiki and whether its working tree has uncommitted changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiStatus {
    #[serde(flatten)]
    pub wiki: Wiki,
    pub has_changes: bool,
}

/// What the activated view displays, loaded from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewData {
    /// The views without storage data: not-found, or a fallback
    None,
    /// Home lists every wiki
    Home { wikis: Vec<Wiki> },
    /// Workspace shows one wiki's file tree
    Workspace { wiki: Wiki, tree: FileNode },
    /// `content` is `None` for a document that doesn't exist yet
    #[serde(rename_all = "camelCase")]
    Editor {
        wiki: Wiki,
        file_path: String,
        content: Option<String>,
    },
    /// Conflict resolution starts from the wikis with pending changes
    ConflictResolver { pending: Vec<WikiStatus> },
}

impl ViewData {
    /// Loads the data for an activation
    ///
    /// A workspace or editor for a wiki that doesn't exist is an error; an
    /// editor for a missing document is not.
    pub fn load(store: &WikiStore, activation: &Activation) -> WikiResult<Self> {
        match (&activation.view, &activation.props) {
            (View::Home, _) => Ok(ViewData::Home {
                wikis: store.list()?,
            }),
            (View::Workspace, ViewProps::Workspace { wiki_name }) => Ok(ViewData::Workspace {
                wiki: store.get(wiki_name)?,
                tree: store.file_tree(wiki_name)?,
            }),
            (
                View::Editor,
                ViewProps::Editor {
                    wiki_name,
                    file_path,
                },
            ) => {
                let wiki = store.get(wiki_name)?;
                let content = match store.read_file(wiki_name, file_path) {
                    Ok(content) => Some(content),
                    Err(WikiError::FileNotFound(_)) => None,
                    Err(e) => return Err(e),
                };
                Ok(ViewData::Editor {
                    wiki,
                    file_path: file_path.clone(),
                    content,
                })
            }
            (View::ConflictResolver, _) => {
                let mut pending = Vec::new();
                for wiki in store.list()? {
                    let has_changes = store.repository(&wiki.name)?.has_uncommitted_changes()?;
                    if has_changes {
                        pending.push(WikiStatus { wiki, has_changes });
                    }
                }
                Ok(ViewData::ConflictResolver { pending })
            }
            _ => Ok(ViewData::None),
        }
    }
}
