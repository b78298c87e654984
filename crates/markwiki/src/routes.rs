//! The MarkWiki route table
//!
//! Declaration order is precedence. The catch-all stays last.

use markwiki_router::{Route, RouteTableError, Router};

use crate::config::RouterConfig;
use crate::views::View;

pub const HOME: &str = "home";
pub const WORKSPACE: &str = "workspace";
pub const EDITOR: &str = "editor";
pub const CONFLICT_RESOLVER: &str = "conflict-resolver";
pub const NOT_FOUND: &str = "not-found";

/// Routes in declaration order
pub fn route_table() -> Result<Vec<Route>, RouteTableError> {
    Ok(vec![
        Route::new(HOME, "/", View::Home.id())?,
        Route::new(WORKSPACE, "/workspace/:wikiName", View::Workspace.id())?.with_props(),
        Route::new(
            EDITOR,
            "/workspace/:wikiName/edit/:filePath(.*)",
            View::Editor.id(),
        )?
        .with_props(),
        Route::new(CONFLICT_RESOLVER, "/conflict-resolver", View::ConflictResolver.id())?,
        Route::new(NOT_FOUND, "/:pathMatch(.*)*", View::NotFound.id())?,
    ])
}

/// Builds the router for the table with the configured matching options
pub fn build_router(config: &RouterConfig) -> Result<Router, RouteTableError> {
    Ok(Router::from_routes(route_table()?)?
        .with_case_sensitivity(config.case_insensitive)
        .with_strict(config.strict))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builds() {
        let router = build_router(&RouterConfig::default()).unwrap();
        assert_eq!(router.len(), 5);
        assert_eq!(router.not_found_route().unwrap().name, NOT_FOUND);
    }

    #[test]
    fn test_every_view_is_known() {
        for route in route_table().unwrap() {
            assert!(route.view.parse::<View>().is_ok(), "{}", route.view);
        }
    }

    #[test]
    fn test_only_param_routes_forward() {
        let forwarding: Vec<String> = route_table()
            .unwrap()
            .into_iter()
            .filter(|r| r.forward_params)
            .map(|r| r.name)
            .collect();
        assert_eq!(forwarding, vec![WORKSPACE, EDITOR]);
    }
}
