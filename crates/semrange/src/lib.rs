//! npm-compatible semantic version range matching
//!
//! This crate parses range expressions such as `^1.2.3`, `~1.2`, `1.x || >=2.5.0`
//! or `1.2.3 - 2.3.4` and checks concrete versions against them, following the
//! rules of npm's `semver` package, including its prerelease handling.
//!
//! ```
//! use semrange::{parse_range, parse_version, ParseOptions};
//!
//! let range = parse_range("^1.2.3 || 2.x", ParseOptions::default()).unwrap();
//! assert!(range.includes(&parse_version("1.8.0").unwrap()));
//! assert!(!range.includes(&parse_version("3.0.0").unwrap()));
//! assert_eq!(range.to_string(), ">=1.2.3 <2.0.0||>=2.0.0 <3.0.0");
//! ```

pub mod constraint;
mod comparator_parser;
mod options;
mod range;
mod range_parser;
mod semver;
mod version;

pub use comparator_parser::ComparatorParser;
pub use constraint::{Comparator, ComparatorSet, InvalidOperatorError, Operator};
pub use options::ParseOptions;
pub use range::Range;
pub use range_parser::{parse_range, RangeParseError, RangeParser};
pub use semver::Semver;
pub use version::{Identifier, InvalidVersionFormat, Version, MAX_LENGTH};

/// Parse a strict semantic version (`1.2.3-rc.1+build`, optional leading `v`)
pub fn parse_version(text: &str) -> Result<Version, InvalidVersionFormat> {
    Version::parse(text)
}
