/// Route pattern module
///
/// Pure components for turning `/literal/:param` strings into compiled
/// patterns, matching them against paths, and generating paths back.
pub mod parser;
pub mod pattern;

pub use parser::{parse_pattern, RoutePattern};
pub use pattern::{classify_segment, PatternSegment};
