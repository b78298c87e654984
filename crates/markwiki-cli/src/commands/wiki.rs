use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use markwiki::{Config, FileNode, GitIdentity, WikiStore};

#[derive(Subcommand)]
pub enum WikiCommand {
    /// List the wikis in the storage directory
    List,

    /// Create an empty wiki backed by a new git repository
    Create {
        name: String,

        /// Git author name (defaults to [git] username)
        #[arg(long)]
        username: Option<String>,

        /// Git author email (defaults to [git] email)
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a wiki and all of its documents
    Delete { name: String },

    /// Print a wiki's file tree
    Tree {
        name: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an empty markdown document
    NewFile {
        name: String,
        /// Path relative to the wiki root, e.g. "daily/today.md"
        path: String,
    },

    /// Show whether a wiki has uncommitted changes
    Status { name: String },

    /// Commit every change in a wiki
    Commit {
        name: String,
        #[arg(short, long)]
        message: String,
    },
}

pub fn execute(config: Config, command: WikiCommand) -> Result<()> {
    let store = WikiStore::open(&config.storage.dir).with_context(|| {
        format!(
            "Failed to open wiki storage: {}",
            config.storage.dir.display()
        )
    })?;

    match command {
        WikiCommand::List => {
            let wikis = store.list()?;
            if wikis.is_empty() {
                println!("{}", "No wikis yet".yellow());
            }
            for wiki in wikis {
                let remote = if wiki.has_remote_repo { "remote" } else { "local" };
                println!("  {} {}", wiki.name.cyan(), remote.dimmed());
            }
        }
        WikiCommand::Create {
            name,
            username,
            email,
        } => {
            let identity = identity(&config, username, email)?;
            let wiki = store.create_local(&name, &identity)?;
            println!("{} {}", "Created".green(), wiki.path.display());
        }
        WikiCommand::Delete { name } => {
            store.delete(&name)?;
            println!("{} {}", "Deleted".green(), name);
        }
        WikiCommand::Tree { name, json } => {
            let tree = store.file_tree(&name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                print_tree(&tree, 0);
            }
        }
        WikiCommand::NewFile { name, path } => {
            let (parent, file_name) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
            store.create_file(&name, parent, file_name)?;
            println!("{} {}", "Created".green(), path);
        }
        WikiCommand::Status { name } => {
            if store.repository(&name)?.has_uncommitted_changes()? {
                println!("{} has uncommitted changes", name.yellow());
            } else {
                println!("{} is clean", name.green());
            }
        }
        WikiCommand::Commit { name, message } => {
            let commit = store.repository(&name)?.commit_all(&message)?;
            println!("{} {}", "Committed".green(), commit);
        }
    }

    Ok(())
}

/// Flags win over the config file; both fields are required
fn identity(
    config: &Config,
    username: Option<String>,
    email: Option<String>,
) -> Result<GitIdentity> {
    let name = username.or_else(|| config.git.username.clone());
    let email = email.or_else(|| config.git.email.clone());
    match (name, email) {
        (Some(name), Some(email)) => Ok(GitIdentity::new(name, email)),
        _ => Err(anyhow!(
            "a git identity is required: pass --username and --email or set [git] in the config"
        )),
    }
}

fn print_tree(node: &FileNode, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.is_directory {
        println!("{}{}/", indent, node.name.blue().bold());
    } else {
        println!("{}{}", indent, node.name);
    }
    for child in node.children.iter().flatten() {
        print_tree(child, depth + 1);
    }
}
