use anyhow::{Context, Result};
use colored::Colorize;
use markwiki::{Config, ViewData, ViewProps, WikiStore};

pub fn execute(config: Config, url: &str, json: bool, with_data: bool) -> Result<()> {
    let storage_dir = config.storage.dir.clone();
    let mut app = super::mount(config)?;
    let activation = app.navigate(url)?;

    let data = if with_data {
        let store = WikiStore::open(&storage_dir).with_context(|| {
            format!("Failed to open wiki storage: {}", storage_dir.display())
        })?;
        Some(ViewData::load(&store, activation)?)
    } else {
        None
    };

    if json {
        let output = match &data {
            Some(data) => serde_json::json!({ "activation": activation, "data": data }),
            None => serde_json::to_value(activation)?,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Location: {}", activation.location.to_string().cyan());
    println!(
        "Route:    {}",
        activation.route_name.as_deref().unwrap_or("(fallback)")
    );
    println!("View:     {}", activation.view.to_string().yellow().bold());

    match &activation.props {
        ViewProps::None => {}
        ViewProps::Workspace { wiki_name } => {
            println!("Props:    wikiName = {}", wiki_name);
        }
        ViewProps::Editor {
            wiki_name,
            file_path,
        } => {
            println!("Props:    wikiName = {}", wiki_name);
            println!("          filePath = {}", file_path);
        }
    }

    if let Some(data) = data {
        println!("Data:");
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Ok(())
}
