use regex::Regex;

/// Regex constraint attached to a single-segment parameter, e.g. `:id(\d+)`
///
/// The expression is anchored, so it must match the whole segment.
///
/// ```
/// use markwiki_router::ParamConstraint;
///
/// let c = ParamConstraint::new(r"\d+").unwrap();
/// assert!(c.validate("42"));
/// assert!(!c.validate("42a"));
/// ```
#[derive(Debug, Clone)]
pub struct ParamConstraint {
    source: String,
    regex: Regex,
}

impl ParamConstraint {
    /// Compiles a constraint from the text between the parentheses
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as written in the pattern
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks a decoded segment value against the constraint
    pub fn validate(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for ParamConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
