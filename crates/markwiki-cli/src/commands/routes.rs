use anyhow::Result;
use colored::Colorize;
use markwiki::Config;

pub fn execute(config: Config) -> Result<()> {
    let app = super::mount(config)?;
    let router = app.router();

    println!("{}", "Route table (first match wins)".green().bold());
    println!();

    for (idx, route) in router.routes().iter().enumerate() {
        let props = if route.forward_params {
            format!("props: {}", route.params.join(", "))
        } else {
            String::new()
        };
        println!(
            "{:>2}. {:<18} {:<42} {:<22} {}",
            idx + 1,
            route.name.cyan(),
            route.pattern,
            route.view.yellow(),
            props.dimmed()
        );
    }

    println!();
    println!(
        "Matching: {}, {}",
        if router.is_case_insensitive() { "case-insensitive" } else { "case-sensitive" },
        if router.is_strict() { "strict trailing slash" } else { "trailing slash ignored" }
    );

    Ok(())
}
