//! Hash-fragment history
//!
//! Everything after the first `#` of a URL is the application path, so
//! `http://host/base/#/workspace/notes?tab=git` addresses `/workspace/notes`
//! with query `tab=git`. A URL without a fragment addresses `/`.
//!
//! A location keeps its path as written apart from a leading `/`. Trailing
//! slashes and doubled separators are left for the router to judge, since a
//! strict router treats `/workspace/notes/` differently from `/workspace/notes`.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use crate::path::normalize_path;

/// A resolved location: rooted path plus query pairs in order of appearance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parses a full URL, a `#/fragment` or a bare path
    ///
    /// ```
    /// use markwiki_router::Location;
    ///
    /// let loc = Location::parse("http://localhost:1420/#/workspace/notes?tab=git");
    /// assert_eq!(loc.path, "/workspace/notes");
    /// assert_eq!(loc.query_value("tab"), Some("git"));
    ///
    /// assert_eq!(Location::parse("#/conflict-resolver").path, "/conflict-resolver");
    /// assert_eq!(Location::parse("#/workspace/notes/").path, "/workspace/notes/");
    /// assert_eq!(Location::parse("http://localhost:1420/").path, "/");
    /// ```
    pub fn parse(input: &str) -> Self {
        let fragment = match input.split_once('#') {
            Some((_, fragment)) => fragment,
            None if input.contains("://") => "",
            None => input,
        };

        let (path, query) = match fragment.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (fragment, Vec::new()),
        };

        Self {
            path: rooted(path),
            query,
        }
    }

    /// Location of a path with no query
    pub fn from_path(path: &str) -> Self {
        Self {
            path: rooted(path),
            query: Vec::new(),
        }
    }

    /// Path in canonical form, as a non-strict router sees it
    pub fn normalized_path(&self) -> Cow<'_, str> {
        normalize_path(&self.path)
    }

    /// First value bound to `key` in the query
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fragment form, e.g. `#/workspace/notes?tab=git`
    pub fn to_fragment(&self) -> String {
        format!("#{}", self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                sep,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or(spaced)
}

/// Back/forward stack of visited locations under a base URL
///
/// ```
/// use markwiki_router::{HashHistory, Location};
///
/// let mut history = HashHistory::new("/");
/// history.push(Location::parse("#/workspace/notes"));
/// history.push(Location::parse("#/conflict-resolver"));
///
/// assert_eq!(history.back().unwrap().path, "/workspace/notes");
/// assert_eq!(history.forward().unwrap().path, "/conflict-resolver");
/// assert!(history.forward().is_none());
/// assert_eq!(history.href(history.current()), "/#/conflict-resolver");
/// ```
#[derive(Debug, Clone)]
pub struct HashHistory {
    base: String,
    entries: Vec<Location>,
    position: usize,
}

impl HashHistory {
    /// Starts a history at `/` under `base`
    pub fn new(base: &str) -> Self {
        Self::starting_at(base, Location::from_path("/"))
    }

    /// Starts a history at a given location
    pub fn starting_at(base: &str, start: Location) -> Self {
        Self {
            base: normalize_base(base),
            entries: vec![start],
            position: 0,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.position]
    }

    /// Pushes a new entry, discarding anything ahead of the current one
    pub fn push(&mut self, location: Location) -> &Location {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position += 1;
        trace!(position = self.position, "history push");
        self.current()
    }

    /// Replaces the current entry
    pub fn replace(&mut self, location: Location) -> &Location {
        self.entries[self.position] = location;
        self.current()
    }

    pub fn back(&mut self) -> Option<&Location> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if self.position + 1 >= self.entries.len() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full href for a location under the base
    pub fn href(&self, location: &Location) -> String {
        format!("{}{}", self.base, location.to_fragment())
    }
}

fn normalize_base(base: &str) -> String {
    let normalized = normalize_path(base);
    if normalized == "/" {
        "/".to_string()
    } else {
        format!("{}/", normalized)
    }
}
