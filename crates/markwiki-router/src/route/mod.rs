/// Route pattern parsing
///
/// Pure functional components that turn path templates into typed segments.
pub mod pattern;

pub use pattern::{classify_segment, parse_pattern, PatternSegment, Repeat};
