//! Composition root
//!
//! An [`App`] collects configuration, plugins and a notifier. [`App::mount`]
//! consumes it and returns the running [`MountedApp`], so an app can only be
//! mounted once.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use markwiki_router::{HashHistory, Location, Router};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::config::{Config, NotifyBackend, NotifyConfig};
use crate::error::{AppError, Result};
use crate::notify::{toast_channel, DialogNotifier, Notifier, StdioDialog, ToastReceiver};
use crate::plugin::{AppContext, EditorPlugin, Plugin};
use crate::routes;
use crate::views::{View, ViewProps};

/// What the shell shows after a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    /// Matched route, `None` when the fallback view was used
    pub route_name: Option<String>,
    pub view: View,
    pub props: ViewProps,
    #[serde(serialize_with = "serialize_location")]
    pub location: Location,
}

fn serialize_location<S: Serializer>(
    location: &Location,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(location)
}

/// Resolves a location against the router, falling back to `fallback` on no match
pub fn resolve(router: &Router, fallback: View, location: Location) -> Result<Activation> {
    match router.match_route(&location.path) {
        Some(route_match) => {
            let view: View = route_match.route.view.parse()?;
            let props = ViewProps::from_params(view, route_match.props())?;
            Ok(Activation {
                route_name: Some(route_match.route.name),
                view,
                props,
                location,
            })
        }
        None => {
            warn!(path = %location.path, %fallback, "no route matched, using fallback view");
            Ok(Activation {
                route_name: None,
                view: fallback,
                props: ViewProps::None,
                location,
            })
        }
    }
}

/// Notifier chosen by configuration, plus the toast receiver when one exists
pub fn notifier_for(config: &NotifyConfig) -> (Rc<dyn Notifier>, Option<ToastReceiver>) {
    match config.backend {
        NotifyBackend::Dialog => {
            let notifier: Rc<dyn Notifier> = Rc::new(DialogNotifier::new(StdioDialog));
            (notifier, None)
        }
        NotifyBackend::Toast => {
            let (notifier, receiver) = toast_channel();
            let notifier: Rc<dyn Notifier> = Rc::new(notifier);
            (notifier, Some(receiver))
        }
    }
}

/// An application that has not been mounted yet
pub struct App {
    config: Config,
    context: AppContext,
    installed: Vec<String>,
    notifier: Rc<dyn Notifier>,
    toasts: Option<ToastReceiver>,
}

impl App {
    /// Creates an app with the notifier backend named in `config`
    pub fn new(config: Config) -> Self {
        let (notifier, toasts) = notifier_for(&config.notify);
        Self {
            config,
            context: AppContext::default(),
            installed: Vec::new(),
            notifier,
            toasts,
        }
    }

    /// Replaces the configured notifier
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Rc::new(notifier);
        self.toasts = None;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Installs a plugin; a plugin whose name is already installed is skipped
    pub fn use_plugin<P: Plugin>(mut self, plugin: P) -> Result<Self> {
        let name = plugin.name().to_string();
        if self.installed.contains(&name) {
            warn!(plugin = %name, "plugin already installed, skipping");
            return Ok(self);
        }

        plugin.install(&mut self.context)?;
        info!(plugin = %name, "plugin installed");
        self.installed.push(name);
        Ok(self)
    }

    pub fn installed_plugins(&self) -> &[String] {
        &self.installed
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Takes the toast receiver, if the toast backend is active
    pub fn take_toasts(&mut self) -> Option<ToastReceiver> {
        self.toasts.take()
    }

    /// Installs the MarkWiki router and editor, then mounts on the configured target
    pub fn bootstrap(self) -> Result<MountedApp> {
        let router = routes::build_router(&self.config.router)?;
        let editor = self.config.editor.clone();
        let target = self.config.app.mount_target.clone();

        let mut app = self.use_plugin(router)?;
        if editor.enabled {
            app = app.use_plugin(EditorPlugin::new(editor.component))?;
        }
        app.mount(&target)
    }

    /// Mounts onto an `#id` target and performs the initial navigation
    pub fn mount(self, target: &str) -> Result<MountedApp> {
        validate_target(target)?;

        let fallback: View = self.config.app.fallback_view.parse()?;
        let (components, router) = self.context.into_parts();
        let router = router.ok_or(AppError::RouterNotInstalled)?;

        for route in router.routes() {
            route.view.parse::<View>()?;
        }

        let start = Location::parse(&self.config.app.start);
        let history = HashHistory::starting_at(&self.config.router.base, start.clone());
        let current = resolve(&router, fallback, start)?;

        info!(
            mount_target = target,
            routes = router.len(),
            view = %current.view,
            "app mounted"
        );

        Ok(MountedApp {
            target: target.to_string(),
            router,
            history,
            current,
            fallback,
            components,
            notifier: self.notifier,
            toasts: self.toasts,
            listeners: Vec::new(),
        })
    }
}

fn validate_target(target: &str) -> Result<()> {
    match target.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => Ok(()),
        _ => Err(AppError::InvalidMountTarget(target.to_string())),
    }
}

type Listener = Box<dyn FnMut(&Activation)>;

/// A mounted, running application
pub struct MountedApp {
    target: String,
    router: Router,
    history: HashHistory,
    current: Activation,
    fallback: View,
    components: BTreeMap<String, String>,
    notifier: Rc<dyn Notifier>,
    toasts: Option<ToastReceiver>,
    listeners: Vec<Listener>,
}

impl MountedApp {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current(&self) -> &Activation {
        &self.current
    }

    pub fn history(&self) -> &HashHistory {
        &self.history
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Takes the toast receiver, if the toast backend is active
    pub fn take_toasts(&mut self) -> Option<ToastReceiver> {
        self.toasts.take()
    }

    pub fn toasts_mut(&mut self) -> Option<&mut ToastReceiver> {
        self.toasts.as_mut()
    }

    /// Calls `listener` after every navigation that changes the active location
    pub fn subscribe(&mut self, listener: impl FnMut(&Activation) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Navigates to a URL, fragment or path and activates the matching view
    ///
    /// Navigating to the current location is a no-op.
    pub fn navigate(&mut self, target: &str) -> Result<&Activation> {
        let location = Location::parse(target);
        if self.is_current(&location) {
            debug!(location = %location, "navigation to current location ignored");
            return Ok(&self.current);
        }

        let activation = resolve(&self.router, self.fallback, location.clone())?;
        self.history.push(location);
        Ok(self.activate(activation))
    }

    /// Like `navigate`, but replaces the current history entry
    pub fn replace(&mut self, target: &str) -> Result<&Activation> {
        let location = Location::parse(target);
        let activation = resolve(&self.router, self.fallback, location.clone())?;
        self.history.replace(location);
        Ok(self.activate(activation))
    }

    /// Steps back in history; `None` at the first entry
    pub fn back(&mut self) -> Result<Option<&Activation>> {
        let Some(location) = self.history.back().cloned() else {
            return Ok(None);
        };
        let activation = resolve(&self.router, self.fallback, location)?;
        Ok(Some(self.activate(activation)))
    }

    /// Steps forward in history; `None` at the last entry
    pub fn forward(&mut self) -> Result<Option<&Activation>> {
        let Some(location) = self.history.forward().cloned() else {
            return Ok(None);
        };
        let activation = resolve(&self.router, self.fallback, location)?;
        Ok(Some(self.activate(activation)))
    }

    /// Href for a named route under the history base
    pub fn href_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.router
            .url_for_params(name, params)
            .map(|path| self.history.href(&Location::from_path(&path)))
    }

    /// Whether `location` addresses the active entry, judged the way the router matches
    fn is_current(&self, location: &Location) -> bool {
        let current = &self.current.location;
        if self.router.is_strict() {
            return location == current;
        }
        location.query == current.query && location.normalized_path() == current.normalized_path()
    }

    fn activate(&mut self, activation: Activation) -> &Activation {
        info!(
            location = %activation.location,
            view = %activation.view,
            route = activation.route_name.as_deref().unwrap_or("-"),
            "view activated"
        );
        self.current = activation;
        for listener in &mut self.listeners {
            listener(&self.current);
        }
        &self.current
    }
}

impl fmt::Debug for MountedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedApp")
            .field("target", &self.target)
            .field("current", &self.current)
            .field("routes", &self.router.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target() {
        assert!(validate_target("#app").is_ok());
        assert!(validate_target("#").is_err());
        assert!(validate_target("app").is_err());
        assert!(validate_target("#my app").is_err());
    }

    #[test]
    fn test_resolve_falls_back_without_catch_all() {
        let router = Router::new();
        let activation = resolve(&router, View::NotFound, Location::parse("#/x")).unwrap();
        assert_eq!(activation.route_name, None);
        assert_eq!(activation.view, View::NotFound);
        assert_eq!(activation.props, ViewProps::None);
    }
}
