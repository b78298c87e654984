//! Errors raised while building a route table.
//!
//! Matching itself never fails: an unmatched path simply yields `None`.

use thiserror::Error;

/// Reasons a route or route table is rejected at build time
#[derive(Error, Debug)]
pub enum RouteTableError {
    /// The pattern could not be parsed
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// What was wrong with it
        reason: String,
    },

    /// A wildcard segment was followed by further segments
    #[error("wildcard segment must be the last segment of `{pattern}`")]
    WildcardNotLast {
        /// Offending pattern
        pattern: String,
    },

    /// A route was declared after a catch-all and could never match
    #[error("route `{route}` is declared after catch-all route `{catch_all}` and can never match")]
    ShadowedByCatchAll {
        /// Name of the unreachable route
        route: String,
        /// Name of the catch-all declared before it
        catch_all: String,
    },

    /// Two routes share a name
    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    /// A parameter constraint is not a valid regular expression
    #[error("invalid constraint on `{pattern}`: {source}")]
    InvalidConstraint {
        /// Offending pattern
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },
}

/// Result alias for route table construction
pub type Result<T> = std::result::Result<T, RouteTableError>;
