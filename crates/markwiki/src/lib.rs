// MarkWiki - application shell
// Route table, composition root, notifications and wiki storage for the wiki frontend

pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod plugin;
pub mod routes;
pub mod views;
pub mod wiki;

// Re-export core types
pub use app::{resolve, Activation, App, MountedApp};
pub use config::Config;
pub use error::{AppError, Result, WikiError, WikiResult};
pub use notify::{Acknowledgement, Level, Notifier};
pub use plugin::{AppContext, EditorPlugin, Plugin};
pub use views::{View, ViewProps};
pub use wiki::{FileNode, GitIdentity, ViewData, Wiki, WikiStore};

// Re-export the router crate
pub use markwiki_router as router;
