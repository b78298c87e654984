use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use markwiki::{Activation, Config, MountedApp, ViewData, WikiStore};
use tracing::info;

const HELP: &str = "\
Commands:
  <url|#/fragment|/path>   navigate
  :back / :forward         move through history
  :ok <text>               success notification
  :err <text>              error notification
  :routes                  list route names
  :data                    show what the current view displays
  :quit                    exit";

pub fn execute(config: Config) -> Result<()> {
    let store = WikiStore::open(&config.storage.dir).with_context(|| {
        format!(
            "Failed to open wiki storage: {}",
            config.storage.dir.display()
        )
    })?;
    let mut app = super::mount(config)?;
    app.subscribe(print_activation);

    println!("{}", "MarkWiki shell mounted".green().bold());
    println!("Target: {}", app.target().cyan());
    print_activation(app.current());
    println!();
    println!("{}", HELP.dimmed());

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        if !handle_line(&mut app, &store, line.trim())? {
            break;
        }
        drain_toasts(&mut app);
    }

    info!("shell exited");
    Ok(())
}

/// Returns false when the loop should stop
fn handle_line(app: &mut MountedApp, store: &WikiStore, line: &str) -> Result<bool> {
    match line.split_once(' ').unwrap_or((line, "")) {
        ("", _) => {}
        (":quit" | ":q", _) => return Ok(false),
        (":back", _) => {
            if app.back()?.is_none() {
                println!("{}", "already at the first entry".yellow());
            }
        }
        (":forward", _) => {
            if app.forward()?.is_none() {
                println!("{}", "already at the last entry".yellow());
            }
        }
        (":ok", text) => {
            app.notifier().success(text);
        }
        (":err", text) => {
            app.notifier().error(text);
        }
        (":routes", _) => {
            for route in app.router().routes() {
                println!("  {} {}", route.name.cyan(), route.pattern);
            }
        }
        (":data", _) => match ViewData::load(store, app.current()) {
            Ok(data) => println!("{}", serde_json::to_string_pretty(&data)?),
            Err(e) => {
                app.notifier().error(&e.to_string());
            }
        },
        (":help", _) => println!("{}", HELP),
        (cmd, _) if cmd.starts_with(':') => {
            println!("{} {}", "unknown command".red(), cmd);
        }
        _ => {
            app.navigate(line)?;
        }
    }
    Ok(true)
}

fn drain_toasts(app: &mut MountedApp) {
    if let Some(toasts) = app.toasts_mut() {
        for toast in toasts.drain() {
            println!("{} {}", "[toast]".magenta(), toast.text);
        }
    }
}

fn print_activation(activation: &Activation) {
    let route = activation.route_name.as_deref().unwrap_or("(fallback)");
    println!(
        "{} {} {} {}",
        "→".green(),
        activation.view.to_string().yellow().bold(),
        format!("[{}]", route).dimmed(),
        activation.location
    );
    if let Some(wiki) = activation.props.wiki_name() {
        println!("  wiki: {}", wiki);
    }
}
