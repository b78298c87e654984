//! Plugins installed into an [`App`](crate::App) before it is mounted

use std::collections::BTreeMap;

use markwiki_router::Router;
use tracing::{debug, warn};

use crate::error::Result;

/// Registration surface handed to plugins during `use_plugin`
#[derive(Debug, Default)]
pub struct AppContext {
    /// Global component name → plugin that registered it
    components: BTreeMap<String, String>,
    router: Option<Router>,
}

impl AppContext {
    /// Registers a global component; a later registration replaces an earlier one
    pub fn register_component(&mut self, name: impl Into<String>, provider: &str) {
        let name = name.into();
        if let Some(previous) = self.components.insert(name.clone(), provider.to_string()) {
            warn!(component = %name, %previous, %provider, "component re-registered");
        } else {
            debug!(component = %name, %provider, "component registered");
        }
    }

    pub fn set_router(&mut self, router: Router) {
        self.router = Some(router);
    }

    pub fn router(&self) -> Option<&Router> {
        self.router.as_ref()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn components(&self) -> &BTreeMap<String, String> {
        &self.components
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, String>, Option<Router>) {
        (self.components, self.router)
    }
}

/// Something that extends an app at bootstrap time
///
/// Plugins are identified by name; installing the same name twice is a no-op.
pub trait Plugin {
    fn name(&self) -> &str;

    fn install(self, ctx: &mut AppContext) -> Result<()>;
}

/// The router installs itself along with its view/link components
impl Plugin for Router {
    fn name(&self) -> &str {
        "router"
    }

    fn install(self, ctx: &mut AppContext) -> Result<()> {
        ctx.register_component("RouterView", "router");
        ctx.register_component("RouterLink", "router");
        ctx.set_router(self);
        Ok(())
    }
}

/// Third-party markdown editor, registered as a global component
#[derive(Debug, Clone)]
pub struct EditorPlugin {
    component: String,
}

impl EditorPlugin {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Default for EditorPlugin {
    fn default() -> Self {
        Self::new("mavon-editor")
    }
}

impl Plugin for EditorPlugin {
    fn name(&self) -> &str {
        "markdown-editor"
    }

    fn install(self, ctx: &mut AppContext) -> Result<()> {
        if self.component.trim().is_empty() {
            return Err(crate::AppError::Plugin {
                name: self.name().to_string(),
                reason: "component name is empty".to_string(),
            });
        }
        ctx.register_component(self.component, "markdown-editor");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_plugin_registers_components() {
        let mut ctx = AppContext::default();
        Router::new().install(&mut ctx).unwrap();
        assert!(ctx.router().is_some());
        assert!(ctx.has_component("RouterView"));
        assert!(ctx.has_component("RouterLink"));
    }

    #[test]
    fn test_editor_plugin_registers_component() {
        let mut ctx = AppContext::default();
        EditorPlugin::default().install(&mut ctx).unwrap();
        assert_eq!(
            ctx.components().get("mavon-editor").map(String::as_str),
            Some("markdown-editor")
        );
    }

    #[test]
    fn test_editor_plugin_rejects_blank_component() {
        let mut ctx = AppContext::default();
        let err = EditorPlugin::new("  ").install(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("markdown-editor"));
    }
}
