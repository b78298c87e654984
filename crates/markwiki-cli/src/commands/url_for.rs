use anyhow::{anyhow, Result};
use markwiki::Config;

pub fn execute(config: Config, name: &str, raw_params: &[String]) -> Result<()> {
    let params = super::parse_params(raw_params)?;
    let app = super::mount(config)?;

    if app.router().get_route_by_name(name).is_none() {
        return Err(anyhow!("no route named `{}`", name));
    }

    let href = app
        .href_for(name, &params)
        .ok_or_else(|| anyhow!("missing or invalid parameters for route `{}`", name))?;
    println!("{}", href);

    Ok(())
}
