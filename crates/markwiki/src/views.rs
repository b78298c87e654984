//! Page-level views and the props they receive from the route table

use std::fmt;
use std::str::FromStr;

use markwiki_router::Params;
use serde::Serialize;

use crate::error::{AppError, Result};

/// Views the shell can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Workspace,
    Editor,
    ConflictResolver,
    NotFound,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Workspace,
        View::Editor,
        View::ConflictResolver,
        View::NotFound,
    ];

    /// Component identifier used in the route table
    pub fn id(self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::Workspace => "WorkspaceView",
            View::Editor => "EditorView",
            View::ConflictResolver => "ConflictResolverView",
            View::NotFound => "NotFoundView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| AppError::UnknownView(s.to_string()))
    }
}

/// Typed props handed to an activated view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewProps {
    /// The view takes no props, or the route doesn't forward them
    None,
    #[serde(rename_all = "camelCase")]
    Workspace { wiki_name: String },
    #[serde(rename_all = "camelCase")]
    Editor { wiki_name: String, file_path: String },
}

impl ViewProps {
    /// Builds props for `view` from forwarded route params
    ///
    /// Views without props ignore whatever was forwarded.
    pub fn from_params(view: View, params: Option<&Params>) -> Result<Self> {
        let Some(params) = params else {
            return Ok(ViewProps::None);
        };

        let take = |prop: &'static str| {
            params
                .get(prop)
                .cloned()
                .ok_or(AppError::MissingProp {
                    view: view.id(),
                    prop,
                })
        };

        match view {
            View::Workspace => Ok(ViewProps::Workspace {
                wiki_name: take("wikiName")?,
            }),
            View::Editor => Ok(ViewProps::Editor {
                wiki_name: take("wikiName")?,
                file_path: take("filePath")?,
            }),
            View::Home | View::ConflictResolver | View::NotFound => Ok(ViewProps::None),
        }
    }

    pub fn wiki_name(&self) -> Option<&str> {
        match self {
            ViewProps::Workspace { wiki_name } | ViewProps::Editor { wiki_name, .. } => {
                Some(wiki_name)
            }
            ViewProps::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_view_ids_parse_back() {
        for view in View::ALL {
            assert_eq!(view.id().parse::<View>().unwrap(), view);
        }
    }

    #[test]
    fn test_unknown_view() {
        let err = "SettingsView".parse::<View>().unwrap_err();
        assert!(matches!(err, AppError::UnknownView(name) if name == "SettingsView"));
    }

    #[test]
    fn test_editor_props() {
        let props = ViewProps::from_params(
            View::Editor,
            Some(&params(&[("wikiName", "notes"), ("filePath", "a/b.md")])),
        )
        .unwrap();
        assert_eq!(
            props,
            ViewProps::Editor {
                wiki_name: "notes".to_string(),
                file_path: "a/b.md".to_string()
            }
        );
        assert_eq!(props.wiki_name(), Some("notes"));
    }

    #[test]
    fn test_missing_prop() {
        let err = ViewProps::from_params(View::Editor, Some(&params(&[("wikiName", "notes")])))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingProp {
                view: "EditorView",
                prop: "filePath"
            }
        ));
    }

    #[test]
    fn test_no_forwarded_params() {
        assert_eq!(
            ViewProps::from_params(View::Workspace, None).unwrap(),
            ViewProps::None
        );
        assert_eq!(
            ViewProps::from_params(View::Home, Some(&params(&[("x", "y")]))).unwrap(),
            ViewProps::None
        );
    }

    #[test]
    fn test_props_serialize_camel_case() {
        let props = ViewProps::Workspace {
            wiki_name: "notes".to_string(),
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json, serde_json::json!({"view": "workspace", "wikiName": "notes"}));
    }
}
