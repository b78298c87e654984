//! Integration tests for the MarkWiki shell
//!
//! Covers bootstrap, navigation against the route table, history and notifications.

use std::cell::RefCell;
use std::rc::Rc;

use markwiki::config::NotifyBackend;
use markwiki::notify::{Acknowledgement, Level, Notifier};
use markwiki::router::{Route, Router};
use markwiki::{App, AppError, Config, EditorPlugin, MountedApp, View, ViewProps};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Default)]
struct Recorder(RefCell<Vec<String>>);

impl Notifier for Recorder {
    fn notify(&self, level: Level, message: &str) -> Acknowledgement {
        self.0
            .borrow_mut()
            .push(markwiki::notify::format_message(level, message));
        Acknowledgement::Dismissed
    }
}

fn mounted() -> MountedApp {
    App::new(Config::default())
        .with_notifier(Recorder::default())
        .bootstrap()
        .unwrap()
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn test_bootstrap_mounts_on_app_target() {
    let app = mounted();
    assert_eq!(app.target(), "#app");
    assert_eq!(app.current().view, View::Home);
    assert_eq!(app.router().len(), 5);
    assert!(app.has_component("RouterView"));
    assert!(app.has_component("mavon-editor"));
}

#[test]
fn test_bootstrap_without_editor() {
    let mut config = Config::default();
    config.editor.enabled = false;
    let app = App::new(config)
        .with_notifier(Recorder::default())
        .bootstrap()
        .unwrap();
    assert!(!app.has_component("mavon-editor"));
}

#[test]
fn test_start_location_from_config() {
    let mut config = Config::default();
    config.app.start = "#/workspace/notes".to_string();
    let app = App::new(config)
        .with_notifier(Recorder::default())
        .bootstrap()
        .unwrap();
    assert_eq!(
        app.current().props,
        ViewProps::Workspace {
            wiki_name: "notes".to_string()
        }
    );
}

#[test]
fn test_mount_requires_router() {
    let err = App::new(Config::default())
        .with_notifier(Recorder::default())
        .mount("#app")
        .unwrap_err();
    assert!(matches!(err, AppError::RouterNotInstalled));
}

#[rstest]
#[case("app")]
#[case("#")]
#[case(".app")]
fn test_mount_rejects_bad_target(#[case] target: &str) {
    let err = App::new(Config::default())
        .with_notifier(Recorder::default())
        .use_plugin(Router::new())
        .unwrap()
        .mount(target)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidMountTarget(t) if t == target));
}

#[test]
fn test_mount_rejects_unknown_view_in_table() {
    let router = Router::from_routes([Route::new("x", "/x", "SettingsView").unwrap()]).unwrap();
    let err = App::new(Config::default())
        .with_notifier(Recorder::default())
        .use_plugin(router)
        .unwrap()
        .mount("#app")
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownView(v) if v == "SettingsView"));
}

#[test]
fn test_plugin_installed_once() {
    let app = App::new(Config::default())
        .with_notifier(Recorder::default())
        .use_plugin(EditorPlugin::default())
        .unwrap()
        .use_plugin(EditorPlugin::new("other-editor"))
        .unwrap();
    assert_eq!(app.installed_plugins(), &["markdown-editor".to_string()]);
    assert!(!app.context().has_component("other-editor"));
}

// ============================================================================
// Navigation
// ============================================================================

#[rstest]
#[case("#/", View::Home)]
#[case("#/workspace/notes", View::Workspace)]
#[case("#/workspace/notes/edit/daily/today.md", View::Editor)]
#[case("#/conflict-resolver", View::ConflictResolver)]
#[case("#/does-not-exist", View::NotFound)]
fn test_navigate_activates_view(#[case] fragment: &str, #[case] view: View) {
    let mut app = mounted();
    assert_eq!(app.navigate(fragment).unwrap().view, view);
}

#[test]
fn test_editor_requires_file_path() {
    let mut app = mounted();
    let activation = app.navigate("#/workspace/notes/edit").unwrap();
    assert_eq!(activation.view, View::NotFound);
    assert_eq!(activation.route_name.as_deref(), Some("not-found"));
}

#[test]
fn test_strict_router_rejects_trailing_slash() {
    let mut config = Config::default();
    config.router.strict = true;
    let mut app = App::new(config)
        .with_notifier(Recorder::default())
        .bootstrap()
        .unwrap();

    assert_eq!(app.navigate("#/workspace/notes/").unwrap().view, View::NotFound);
    assert_eq!(app.navigate("#/workspace/notes").unwrap().view, View::Workspace);
}

#[test]
fn test_trailing_slash_ignored_by_default() {
    let seen = Rc::new(RefCell::new(0));
    let mut app = mounted();
    app.navigate("#/workspace/notes").unwrap();
    let sink = Rc::clone(&seen);
    app.subscribe(move |_| *sink.borrow_mut() += 1);

    let activation = app.navigate("#/workspace/notes/").unwrap();
    assert_eq!(activation.view, View::Workspace);
    assert_eq!(*seen.borrow(), 0);
    assert_eq!(app.history().len(), 2);
}

#[test]
fn test_editor_receives_exactly_bound_values() {
    let mut app = mounted();
    let activation = app
        .navigate("http://tauri.localhost/#/workspace/my%20wiki/edit/docs/a%2Bb.md")
        .unwrap();
    assert_eq!(activation.route_name.as_deref(), Some("editor"));
    assert_eq!(
        activation.props,
        ViewProps::Editor {
            wiki_name: "my wiki".to_string(),
            file_path: "docs/a+b.md".to_string()
        }
    );
}

#[test]
fn test_not_found_gets_no_props() {
    let mut app = mounted();
    let activation = app.navigate("#/does-not-exist").unwrap();
    assert_eq!(activation.route_name.as_deref(), Some("not-found"));
    assert_eq!(activation.props, ViewProps::None);
}

#[test]
fn test_listeners_see_each_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut app = mounted();
    let sink = Rc::clone(&seen);
    app.subscribe(move |activation| sink.borrow_mut().push(activation.view));

    app.navigate("#/workspace/notes").unwrap();
    app.navigate("#/workspace/notes").unwrap();
    app.navigate("#/conflict-resolver").unwrap();

    assert_eq!(*seen.borrow(), vec![View::Workspace, View::ConflictResolver]);
}

#[test]
fn test_back_and_forward() {
    let mut app = mounted();
    app.navigate("#/workspace/notes").unwrap();
    app.navigate("#/workspace/notes/edit/a.md").unwrap();

    assert_eq!(app.back().unwrap().unwrap().view, View::Workspace);
    assert_eq!(app.back().unwrap().unwrap().view, View::Home);
    assert!(app.back().unwrap().is_none());
    assert_eq!(app.forward().unwrap().unwrap().view, View::Workspace);
}

#[test]
fn test_replace_does_not_grow_history() {
    let mut app = mounted();
    app.navigate("#/workspace/notes").unwrap();
    app.replace("#/conflict-resolver").unwrap();
    assert_eq!(app.history().len(), 2);
    assert_eq!(app.back().unwrap().unwrap().view, View::Home);
}

#[test]
fn test_href_for_uses_base() {
    let mut config = Config::default();
    config.router.base = "/markwiki".to_string();
    let app = App::new(config)
        .with_notifier(Recorder::default())
        .bootstrap()
        .unwrap();
    assert_eq!(
        app.href_for("workspace", &[("wikiName", "notes")]),
        Some("/markwiki/#/workspace/notes".to_string())
    );
    assert_eq!(app.href_for("workspace", &[]), None);
}

#[test]
fn test_activation_serializes_fragment() {
    let mut app = mounted();
    let activation = app.navigate("#/workspace/notes?tab=git").unwrap();
    let json = serde_json::to_value(activation).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "routeName": "workspace",
            "view": "Workspace",
            "props": {"view": "workspace", "wikiName": "notes"},
            "location": "/workspace/notes?tab=git"
        })
    );
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_notifications_keep_text_verbatim() {
    let recorder = Rc::new(Recorder::default());
    let app = App::new(Config::default())
        .with_notifier(Rc::clone(&recorder))
        .bootstrap()
        .unwrap();

    assert_eq!(app.notifier().success("X"), Acknowledgement::Dismissed);
    assert_eq!(app.notifier().error("  X  "), Acknowledgement::Dismissed);
    assert_eq!(
        *recorder.0.borrow(),
        vec!["成功：X".to_string(), "错误：  X  ".to_string()]
    );
}

#[test]
fn test_toast_backend_from_config() {
    let mut config = Config::default();
    config.notify.backend = NotifyBackend::Toast;
    let mut app = App::new(config).bootstrap().unwrap();

    assert_eq!(app.notifier().success("已同步"), Acknowledgement::Queued);
    let mut toasts = app.take_toasts().unwrap();
    let drained = toasts.drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].text, "成功：已同步");
    assert!(app.take_toasts().is_none());
}
