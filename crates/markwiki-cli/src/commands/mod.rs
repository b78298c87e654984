pub mod resolve;
pub mod routes;
pub mod run;
pub mod url_for;
pub mod wiki;

use anyhow::{bail, Result};
use markwiki::{App, Config, MountedApp};

/// Mounts the app for a one-shot command, notifications going to the configured backend
pub fn mount(config: Config) -> Result<MountedApp> {
    Ok(App::new(config).bootstrap()?)
}

/// Splits `key=value` arguments
pub fn parse_params(raw: &[String]) -> Result<Vec<(&str, &str)>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key, value)),
            _ => bail!("expected key=value, got `{}`", pair),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let raw = vec!["wikiName=notes".to_string(), "filePath=a=b.md".to_string()];
        assert_eq!(
            parse_params(&raw).unwrap(),
            vec![("wikiName", "notes"), ("filePath", "a=b.md")]
        );
    }

    #[test]
    fn test_parse_params_rejects_bare_words() {
        assert!(parse_params(&["notes".to_string()]).is_err());
        assert!(parse_params(&["=notes".to_string()]).is_err());
    }
}
