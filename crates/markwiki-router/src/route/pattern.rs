//! Pattern parsing for route segments
//!
//! Pure functional parsing of path templates such as
//! `/workspace/:wikiName/edit/:filePath(.*)` into typed segments.
use crate::error::{Result, RouteTableError};
use crate::path::segments;
use crate::ParamConstraint;

/// How many trailing segments a wildcard accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// `:name(.*)*` or `:name(.*)?`
    ZeroOrMore,
    /// `:name(.*)` or `:name(.*)+`
    OneOrMore,
}

/// Represents the different kinds of route pattern segments
///
/// # Examples
///
/// ```
/// use markwiki_router::route::pattern::{classify_segment, PatternSegment, Repeat};
///
/// let seg = classify_segment("workspace").unwrap();
/// assert!(matches!(seg, PatternSegment::Static(_)));
///
/// let seg = classify_segment(":wikiName").unwrap();
/// assert!(matches!(seg, PatternSegment::Param { optional: false, .. }));
///
/// let seg = classify_segment(":filePath(.*)").unwrap();
/// assert!(matches!(seg, PatternSegment::Wildcard { repeat: Repeat::OneOrMore, .. }));
///
/// let seg = classify_segment(":pathMatch(.*)*").unwrap();
/// assert!(matches!(seg, PatternSegment::Wildcard { repeat: Repeat::ZeroOrMore, .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegment {
    /// Literal text matched verbatim
    Static(String),
    /// Single-segment parameter: `:name`, `:name?`, `:name(\d+)`
    Param {
        name: String,
        optional: bool,
        constraint: Option<ParamConstraint>,
    },
    /// Greedy tail parameter spanning any remaining segments
    Wildcard { name: String, repeat: Repeat },
}

impl PatternSegment {
    /// Parameter name bound by this segment, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegment::Static(_) => None,
            PatternSegment::Param { name, .. } | PatternSegment::Wildcard { name, .. } => {
                Some(name)
            }
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PatternSegment::Wildcard { .. })
    }
}

fn invalid(segment: &str, reason: &str) -> RouteTableError {
    RouteTableError::InvalidPattern {
        pattern: segment.to_string(),
        reason: reason.to_string(),
    }
}

/// Classifies a single segment into a pattern segment
///
/// # Parsing Rules
///
/// 1. Anything not starting with `:` is **static**
/// 2. `:` is followed by a name made of ASCII alphanumerics and `_`
/// 3. An optional `( ... )` holds a regex; `(.*)` marks a **wildcard**
/// 4. A trailing modifier: `?` (optional), `*` or `+` (wildcard repeat)
///
/// A bare `(.*)` needs at least one segment; only `*` and `?` let a wildcard match nothing.
pub fn classify_segment(segment: &str) -> Result<PatternSegment> {
    let Some(body) = segment.strip_prefix(':') else {
        return Ok(PatternSegment::Static(segment.to_string()));
    };

    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 {
        return Err(invalid(segment, "parameter name is empty"));
    }
    let (name, rest) = body.split_at(name_len);

    let (regex, modifier) = match rest.strip_prefix('(') {
        Some(inner) => {
            let close = inner
                .rfind(')')
                .ok_or_else(|| invalid(segment, "unclosed `(` in parameter"))?;
            (Some(&inner[..close]), &inner[close + 1..])
        }
        None => (None, rest),
    };

    match (regex, modifier) {
        (Some(".*"), "*" | "?") => Ok(PatternSegment::Wildcard {
            name: name.to_string(),
            repeat: Repeat::ZeroOrMore,
        }),
        (Some(".*"), "" | "+") => Ok(PatternSegment::Wildcard {
            name: name.to_string(),
            repeat: Repeat::OneOrMore,
        }),
        (_, "*" | "+") => Err(invalid(
            segment,
            "only `(.*)` parameters may repeat",
        )),
        (regex, "" | "?") => {
            let constraint = regex
                .map(|re| {
                    ParamConstraint::new(re).map_err(|source| RouteTableError::InvalidConstraint {
                        pattern: segment.to_string(),
                        source,
                    })
                })
                .transpose()?;
            Ok(PatternSegment::Param {
                name: name.to_string(),
                optional: modifier == "?",
                constraint,
            })
        }
        _ => Err(invalid(segment, "unexpected characters after parameter")),
    }
}

/// Parses a whole pattern, enforcing that a wildcard is always the last segment
///
/// ```
/// use markwiki_router::route::pattern::parse_pattern;
///
/// let segs = parse_pattern("/workspace/:wikiName/edit/:filePath(.*)").unwrap();
/// assert_eq!(segs.len(), 4);
///
/// assert!(parse_pattern("/:rest(.*)/edit").is_err());
/// ```
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment>> {
    if !pattern.starts_with('/') {
        return Err(RouteTableError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern must start with `/`".to_string(),
        });
    }

    let parsed = segments(pattern)
        .map(classify_segment)
        .collect::<Result<Vec<_>>>()?;

    let wildcard_before_end = parsed
        .iter()
        .rev()
        .skip(1)
        .any(PatternSegment::is_wildcard);
    if wildcard_before_end {
        return Err(RouteTableError::WildcardNotLast {
            pattern: pattern.to_string(),
        });
    }

    Ok(parsed)
}
