//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::range_parser::{RangeParseError, RangeParser};
use crate::{ParseOptions, Range, Version};

/// Main facade for semantic versioning operations
///
/// Every helper is forgiving: an unparsable version never satisfies and an
/// unparsable range is satisfied by nothing.
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str) -> bool {
        Self::satisfies_with(version, range, ParseOptions::default())
    }

    /// Check if a version satisfies a range parsed with `options`
    pub fn satisfies_with(version: &str, range: &str, options: ParseOptions) -> bool {
        match RangeParser::new(options).parse(range) {
            Ok(parsed) => parsed.includes_str(version),
            Err(_) => false,
        }
    }

    /// Parse a range once for repeated checks
    pub fn parse_range(range: &str) -> Result<Range, RangeParseError> {
        RangeParser::default().parse(range)
    }

    /// Check a version against a pre-parsed range
    pub fn satisfies_parsed(version: &str, range: &Range) -> bool {
        range.includes_str(version)
    }

    /// Return all versions that satisfy the range, in input order
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let parsed = match Self::parse_range(range) {
            Ok(parsed) => parsed,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| parsed.includes_str(v))
            .map(|v| v.to_string())
            .collect()
    }

    /// Highest version satisfying the range
    pub fn max_satisfying(versions: &[&str], range: &str) -> Option<String> {
        Self::best_satisfying(versions, range, Ordering::Greater)
    }

    /// Lowest version satisfying the range
    pub fn min_satisfying(versions: &[&str], range: &str) -> Option<String> {
        Self::best_satisfying(versions, range, Ordering::Less)
    }

    fn best_satisfying(versions: &[&str], range: &str, better: Ordering) -> Option<String> {
        let parsed = Self::parse_range(range).ok()?;
        let mut best: Option<(Version, &str)> = None;

        for &text in versions {
            let version = match Version::parse(text) {
                Ok(version) => version,
                Err(_) => continue,
            };
            if !parsed.includes(&version) {
                continue;
            }
            let replace = match &best {
                Some((current, _)) => version.cmp(current) == better,
                None => true,
            };
            if replace {
                best = Some((version, text));
            }
        }

        best.map(|(_, text)| text.to_string())
    }

    /// Canonical text of a range, or `None` if it does not parse
    pub fn valid_range(range: &str) -> Option<String> {
        Self::parse_range(range).ok().map(|parsed| parsed.to_string())
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        // Parsed versions with their original index
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Version::parse(v).ok()?, i)))
            .collect();

        // Stable: versions differing only in build keep their input order
        parsed.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
