//! # MarkWiki Router
//!
//! An ordered, hash-fragment routing table with support for:
//! - Static routes (`/conflict-resolver`)
//! - Named parameters (`/workspace/:wikiName`)
//! - Optional and regex-constrained parameters (`/page/:n?`, `/issue/:id(\d+)`)
//! - Trailing wildcards (`/workspace/:wikiName/edit/:filePath(.*)`, `/:pathMatch(.*)*`)
//!
//! ## Matching Policy
//!
//! Routes are tried in declaration order and the first match wins. There is no
//! scoring: a catch-all declared first would shadow everything, so the table
//! refuses any route declared after a catch-all.
//!
//! ## Path Normalization
//!
//! - Trailing slashes: `/path/` → `/path` (unless strict)
//! - Double slashes: `/path//to` → `/path/to`
//! - Backslashes: `\path\to` → `/path/to`
//!
//! ## Example
//!
//! ```
//! use markwiki_router::{Route, Router};
//!
//! let router = Router::new()
//!     .with_route(Route::new("home", "/", "HomeView").unwrap()).unwrap()
//!     .with_route(Route::new("workspace", "/workspace/:wikiName", "WorkspaceView").unwrap().with_props()).unwrap();
//!
//! let route_match = router.match_route("/workspace/notes").unwrap();
//! assert_eq!(route_match.route.view, "WorkspaceView");
//! assert_eq!(route_match.params.get("wikiName"), Some(&"notes".to_string()));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};

// ============================================================================
// Module Declarations
// ============================================================================

mod constraint;
pub mod error;
pub mod history;
pub mod path;
pub mod route;

pub use constraint::ParamConstraint;
pub use error::RouteTableError;
pub use history::{HashHistory, Location};
pub use path::{is_valid_path, normalize_path};
pub use route::pattern::{classify_segment, parse_pattern, PatternSegment, Repeat};

/// Parameters bound while matching a path
pub type Params = HashMap<String, String>;

// ============================================================================
// Core Types
// ============================================================================

/// A single entry of the route table
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique route name, used for URL generation
    pub name: String,
    /// URL pattern like "/workspace/:wikiName"
    pub pattern: String,
    /// Identifier of the view this route activates
    pub view: String,
    /// Whether bound params are handed to the view as props
    pub forward_params: bool,
    /// Parameter names in pattern order
    pub params: Vec<String>,
    segments: Vec<PatternSegment>,
}

/// Result of matching a route against a path
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Route,
    /// Extracted, percent-decoded parameters
    pub params: Params,
}

impl RouteMatch {
    /// Params to hand to the view, present only when the route forwards them
    ///
    /// ```
    /// use markwiki_router::{Route, Router};
    ///
    /// let router = Router::new()
    ///     .with_route(Route::new("not-found", "/:pathMatch(.*)*", "NotFoundView").unwrap())
    ///     .unwrap();
    ///
    /// let route_match = router.match_route("/does-not-exist").unwrap();
    /// assert!(route_match.props().is_none());
    /// ```
    pub fn props(&self) -> Option<&Params> {
        self.route.forward_params.then_some(&self.params)
    }

    /// Whether the match came from a catch-all route
    pub fn is_catch_all(&self) -> bool {
        self.route.is_catch_all()
    }
}

// ============================================================================
// Route Implementation
// ============================================================================

impl Route {
    /// Parses a pattern into a route that activates `view`
    ///
    /// # Examples
    ///
    /// ```
    /// use markwiki_router::Route;
    ///
    /// let route = Route::new("editor", "/workspace/:wikiName/edit/:filePath(.*)", "EditorView").unwrap();
    /// assert_eq!(route.params, vec!["wikiName", "filePath"]);
    /// assert!(!route.forward_params);
    /// ```
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        view: impl Into<String>,
    ) -> error::Result<Self> {
        let pattern = pattern.into();
        let segments = parse_pattern(&pattern)?;
        let params = segments
            .iter()
            .filter_map(|s| s.param_name().map(str::to_string))
            .collect();

        Ok(Self {
            name: name.into(),
            pattern,
            view: view.into(),
            forward_params: false,
            params,
            segments,
        })
    }

    /// Marks the route as forwarding its params to the view
    pub fn with_props(mut self) -> Self {
        self.forward_params = true;
        self
    }

    /// Parsed pattern segments
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// A catch-all consists of nothing but a wildcard and matches every path
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [PatternSegment::Wildcard {
                repeat: Repeat::ZeroOrMore,
                ..
            }]
        )
    }

    /// Matches this route against a path (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.matches_with_options(path, false)
    }

    /// Matches this route against a path with options
    ///
    /// Walks pattern and path segments together with a tail-recursive helper.
    pub fn matches_with_options(&self, path: &str, case_insensitive: bool) -> Option<Params> {
        let path_segments: Vec<&str> = path::segments(path).collect();

        fn match_segments(
            pattern: &[PatternSegment],
            path: &[&str],
            mut params: Params,
            case_insensitive: bool,
        ) -> Option<Params> {
            let Some((head, rest)) = pattern.split_first() else {
                // Consumed every pattern segment: success only if the path is consumed too
                return path.is_empty().then_some(params);
            };

            match head {
                PatternSegment::Wildcard { name, repeat } => {
                    if path.is_empty() && *repeat == Repeat::OneOrMore {
                        return None;
                    }
                    params.insert(name.clone(), decode(&path.join("/")));
                    Some(params)
                }
                PatternSegment::Param {
                    name,
                    optional: true,
                    constraint,
                } => {
                    // Consume the segment unless the next static segment claims it
                    let should_consume = match (path.first(), rest.first()) {
                        (None, _) => false,
                        (Some(seg), Some(PatternSegment::Static(next))) => {
                            !static_eq(next, seg, case_insensitive)
                        }
                        (Some(_), _) => true,
                    };

                    if should_consume {
                        let value = decode(path[0]);
                        let valid = constraint.as_ref().map_or(true, |c| c.validate(&value));
                        if valid {
                            let mut consumed = params.clone();
                            consumed.insert(name.clone(), value);
                            if let Some(found) =
                                match_segments(rest, &path[1..], consumed, case_insensitive)
                            {
                                return Some(found);
                            }
                        }
                    }
                    match_segments(rest, path, params, case_insensitive)
                }
                PatternSegment::Param {
                    name, constraint, ..
                } => {
                    let (seg, remaining) = path.split_first()?;
                    let value = decode(seg);
                    if !constraint.as_ref().map_or(true, |c| c.validate(&value)) {
                        return None;
                    }
                    params.insert(name.clone(), value);
                    match_segments(rest, remaining, params, case_insensitive)
                }
                PatternSegment::Static(literal) => {
                    let (seg, remaining) = path.split_first()?;
                    if !static_eq(literal, seg, case_insensitive) {
                        return None;
                    }
                    match_segments(rest, remaining, params, case_insensitive)
                }
            }
        }

        match_segments(
            &self.segments,
            &path_segments,
            HashMap::new(),
            case_insensitive,
        )
    }

    /// Generates a URL for this route by substituting parameters
    ///
    /// Single-segment values are percent-encoded; wildcard values keep their `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use markwiki_router::Route;
    /// use std::collections::HashMap;
    ///
    /// let route = Route::new("editor", "/workspace/:wikiName/edit/:filePath(.*)", "EditorView").unwrap();
    ///
    /// let mut params = HashMap::new();
    /// params.insert("wikiName".to_string(), "my notes".to_string());
    /// params.insert("filePath".to_string(), "daily/today.md".to_string());
    ///
    /// let url = route.generate_url(&params).unwrap();
    /// assert_eq!(url, "/workspace/my%20notes/edit/daily/today.md");
    /// ```
    pub fn generate_url(&self, params: &Params) -> Option<String> {
        let result_segments: Option<Vec<String>> = self
            .segments
            .iter()
            .map(|segment| match segment {
                PatternSegment::Static(literal) => Some(literal.clone()),
                PatternSegment::Param {
                    name,
                    optional,
                    constraint,
                } => match params.get(name) {
                    Some(value) if constraint.as_ref().map_or(true, |c| c.validate(value)) => {
                        Some(urlencoding::encode(value).into_owned())
                    }
                    Some(_) => None,
                    None if *optional => Some(String::new()),
                    None => None,
                },
                PatternSegment::Wildcard { name, repeat } => match params.get(name) {
                    Some(value) => Some(
                        path::segments(value)
                            .map(|s| urlencoding::encode(s).into_owned())
                            .collect::<Vec<_>>()
                            .join("/"),
                    ),
                    None if *repeat == Repeat::ZeroOrMore => Some(String::new()),
                    None => None,
                },
            })
            .collect();

        result_segments.map(|segs| {
            let filtered: Vec<String> = segs.into_iter().filter(|s| !s.is_empty()).collect();

            if filtered.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", filtered.join("/"))
            }
        })
    }
}

fn static_eq(literal: &str, segment: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        literal.eq_ignore_ascii_case(segment)
    } else {
        literal == segment
    }
}

/// Percent-decodes a bound value, keeping the raw text when it is not valid UTF-8
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

// ============================================================================
// Router
// ============================================================================

/// Ordered route table
///
/// Routes keep their declaration order; named routes are indexed for URL generation.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    named_routes: HashMap<String, usize>,
    case_insensitive: bool,
    strict: bool,
}

impl Router {
    /// Creates an empty router (case-insensitive, non-strict)
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            named_routes: HashMap::new(),
            case_insensitive: true,
            strict: false,
        }
    }

    /// Builds a router from routes in declaration order
    ///
    /// ```
    /// use markwiki_router::{Route, Router, RouteTableError};
    ///
    /// let result = Router::from_routes([
    ///     Route::new("not-found", "/:pathMatch(.*)*", "NotFoundView").unwrap(),
    ///     Route::new("home", "/", "HomeView").unwrap(),
    /// ]);
    /// assert!(matches!(result, Err(RouteTableError::ShadowedByCatchAll { .. })));
    /// ```
    pub fn from_routes<I>(routes: I) -> error::Result<Self>
    where
        I: IntoIterator<Item = Route>,
    {
        routes
            .into_iter()
            .try_fold(Self::new(), |router, route| router.with_route(route))
    }

    // ========================================================================
    // Functional Builder Methods for Router Configuration
    // ========================================================================

    /// Configures case sensitivity of static segments
    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// In strict mode a trailing slash is significant
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Appends a route to the table
    ///
    /// Fails if the name is taken or a catch-all was already declared.
    pub fn with_route(mut self, route: Route) -> error::Result<Self> {
        if let Some(catch_all) = self.routes.iter().find(|r| r.is_catch_all()) {
            return Err(RouteTableError::ShadowedByCatchAll {
                route: route.name,
                catch_all: catch_all.name.clone(),
            });
        }

        if self.named_routes.contains_key(&route.name) {
            return Err(RouteTableError::DuplicateName(route.name));
        }

        trace!(name = %route.name, pattern = %route.pattern, "registered route");
        self.named_routes.insert(route.name.clone(), self.routes.len());
        self.routes.push(route);
        Ok(self)
    }

    // ========================================================================
    // Route Matching and Lookup Methods
    // ========================================================================

    /// Matches a path against all routes and returns the first match
    ///
    /// Routes are checked in declaration order; iteration stops at the first match.
    ///
    /// # Examples
    ///
    /// ```
    /// use markwiki_router::{Route, Router};
    ///
    /// let router = Router::from_routes([
    ///     Route::new("a", "/wiki/:name", "First").unwrap(),
    ///     Route::new("b", "/wiki/index", "Second").unwrap(),
    /// ]).unwrap();
    ///
    /// assert_eq!(router.match_route("/wiki/index").unwrap().route.name, "a");
    /// ```
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        if self.strict && path.len() > 1 && path.ends_with('/') {
            debug!(path, "strict mode rejects trailing slash");
            return self
                .routes
                .iter()
                .find(|r| r.is_catch_all())
                .and_then(|r| self.try_route(r, path));
        }

        let normalized = normalize_path(path);
        let found = self
            .routes
            .iter()
            .find_map(|route| self.try_route(route, &normalized));

        match &found {
            Some(m) => debug!(path = %normalized, route = %m.route.name, "route matched"),
            None => debug!(path = %normalized, "no route matched"),
        }
        found
    }

    fn try_route(&self, route: &Route, path: &str) -> Option<RouteMatch> {
        route
            .matches_with_options(path, self.case_insensitive)
            .map(|params| RouteMatch {
                route: route.clone(),
                params,
            })
    }

    /// The catch-all route, if the table declares one
    pub fn not_found_route(&self) -> Option<&Route> {
        self.routes.last().filter(|r| r.is_catch_all())
    }

    /// Routes in declaration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Gets a route by its name
    pub fn get_route_by_name(&self, name: &str) -> Option<&Route> {
        self.named_routes.get(name).map(|&idx| &self.routes[idx])
    }

    /// Generates a URL for a named route
    ///
    /// Returns `None` if the route doesn't exist or a required parameter is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use markwiki_router::{Route, Router};
    /// use std::collections::HashMap;
    ///
    /// let router = Router::from_routes([
    ///     Route::new("workspace", "/workspace/:wikiName", "WorkspaceView").unwrap(),
    /// ]).unwrap();
    ///
    /// let mut params = HashMap::new();
    /// params.insert("wikiName".to_string(), "notes".to_string());
    ///
    /// assert_eq!(router.url_for("workspace", &params).unwrap(), "/workspace/notes");
    /// assert!(router.url_for("workspace", &HashMap::new()).is_none());
    /// ```
    pub fn url_for(&self, name: &str, params: &Params) -> Option<String> {
        self.get_route_by_name(name)
            .and_then(|route| route.generate_url(params))
    }

    /// Convenience method for generating URLs from parameter tuples
    ///
    /// ```
    /// use markwiki_router::{Route, Router};
    ///
    /// let router = Router::from_routes([
    ///     Route::new("editor", "/workspace/:wikiName/edit/:filePath(.*)", "EditorView").unwrap(),
    /// ]).unwrap();
    ///
    /// let url = router.url_for_params("editor", &[
    ///     ("wikiName", "notes"),
    ///     ("filePath", "a/b.md"),
    /// ]).unwrap();
    ///
    /// assert_eq!(url, "/workspace/notes/edit/a/b.md");
    /// ```
    pub fn url_for_params(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let param_map: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.url_for(name, &param_map)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
