//! Error types for bootstrapping and navigating the shell

use markwiki_router::RouteTableError;
use thiserror::Error;

/// Errors raised by the composition root
#[derive(Error, Debug)]
pub enum AppError {
    /// Mount target is not an `#id` selector
    #[error("invalid mount target `{0}`: expected `#<id>`")]
    InvalidMountTarget(String),

    /// `mount` was called before a router plugin was installed
    #[error("no router installed; call use_plugin(router) before mount")]
    RouterNotInstalled,

    /// The route table could not be built
    #[error(transparent)]
    RouteTable(#[from] RouteTableError),

    /// A route or the fallback names a view the shell doesn't have
    #[error("unknown view `{0}`")]
    UnknownView(String),

    /// A view that takes props was activated without one of them
    #[error("view `{view}` requires prop `{prop}`")]
    MissingProp {
        view: &'static str,
        prop: &'static str,
    },

    /// A plugin failed to install
    #[error("plugin `{name}` failed to install: {reason}")]
    Plugin { name: String, reason: String },
}

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised by wiki storage and its git repositories
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Name is empty, hidden, or contains a path separator
    #[error("invalid wiki name `{0}`")]
    InvalidName(String),

    /// Relative path escapes the wiki or is otherwise unusable
    #[error("invalid path `{0}`")]
    InvalidPath(String),

    #[error("wiki already exists: {0}")]
    AlreadyExists(String),

    #[error("wiki not found: {0}")]
    NotFound(String),

    /// A directory in the storage root that is not a git repository
    #[error("`{0}` is not a git repository")]
    NotARepository(String),

    #[error("file already exists: {0}")]
    FileExists(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Only markdown documents can be created in a wiki
    #[error("`{0}` must end with .md")]
    NotMarkdown(String),

    #[error("nothing to commit")]
    NothingToCommit,
}

/// Result type alias for storage operations
pub type WikiResult<T> = std::result::Result<T, WikiError>;
