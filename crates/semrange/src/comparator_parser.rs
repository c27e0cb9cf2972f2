//! Parsing of a single AND-group into comparators
//!
//! Shorthand forms expand to plain `>=`/`<` pairs:
//!
//! | input          | expansion            |
//! |----------------|----------------------|
//! | `1.2.3`        | `1.2.3`              |
//! | `1.2.x`        | `>=1.2.0 <1.3.0`     |
//! | `~1.2.3`       | `>=1.2.3 <1.3.0`     |
//! | `^1.2.3`       | `>=1.2.3 <2.0.0`     |
//! | `^0.2.3`       | `>=0.2.3 <0.3.0`     |
//! | `1.2.3 - 2.3.4`| `>=1.2.3 <=2.3.4`    |
//! | `1.2 - 2.3`    | `>=1.2.0 <2.4.0`     |
//! | `>1.2`         | `>=1.3.0`            |
//!
//! The options never change an expansion; `include_prerelease` only
//! affects matching.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constraint::{Comparator, Operator};
use crate::range_parser::RangeParseError;
use crate::version::{parse_prerelease, Identifier, Version};
use crate::ParseOptions;

lazy_static! {
    // Partial version: numeric parts may be x/X/*, prerelease and build only after three parts
    static ref PARTIAL_RE: Regex = Regex::new(
        r"^v?(0|[1-9][0-9]*|[xX*])(?:\.(0|[1-9][0-9]*|[xX*])(?:\.(0|[1-9][0-9]*|[xX*])(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?)?)?$"
    ).unwrap();

    // Hyphen range spanning the whole group
    static ref HYPHEN_RE: Regex = Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap();

    // AND separators
    static ref SEPARATOR_RE: Regex = Regex::new(r"[\s,]+").unwrap();
}

/// Operators that may be separated from their version by whitespace
const BARE_OPERATORS: &[&str] = &["~>", "~", "^", ">=", "<=", ">", "<", "="];

/// Leading operator of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Tilde,
    Caret,
    Primitive(Operator),
}

impl Prefix {
    fn split(token: &str) -> (Prefix, &str) {
        let table = [
            ("~>", Prefix::Tilde),
            ("~", Prefix::Tilde),
            ("^", Prefix::Caret),
            (">=", Prefix::Primitive(Operator::GreaterThanOrEqual)),
            ("<=", Prefix::Primitive(Operator::LessThanOrEqual)),
            (">", Prefix::Primitive(Operator::GreaterThan)),
            ("<", Prefix::Primitive(Operator::LessThan)),
            ("=", Prefix::Primitive(Operator::Equal)),
        ];
        for (text, prefix) in table {
            if let Some(rest) = token.strip_prefix(text) {
                return (prefix, rest);
            }
        }
        (Prefix::Primitive(Operator::Equal), token)
    }
}

/// A possibly incomplete version; `None` marks a wildcard or missing part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    prerelease: Vec<Identifier>,
}

impl Partial {
    fn parse(text: &str, token: &str) -> Result<Self, RangeParseError> {
        let caps = PARTIAL_RE
            .captures(text)
            .ok_or_else(|| RangeParseError::InvalidComparator {
                comparator: token.to_string(),
                reason: format!("\"{}\" is not a version or x-range", text),
            })?;

        let mut parts = [None; 3];
        for (i, part) in parts.iter_mut().enumerate() {
            let raw = match caps.get(i + 1) {
                Some(m) => m.as_str(),
                None => break,
            };
            if matches!(raw, "x" | "X" | "*") {
                // Everything after a wildcard is a wildcard too
                break;
            }
            *part = Some(raw.parse::<u64>().map_err(|_| RangeParseError::InvalidComparator {
                comparator: token.to_string(),
                reason: format!("\"{}\" is too large", raw),
            })?);
        }

        let [major, minor, patch] = parts;
        let prerelease = match (patch, caps.get(4)) {
            (Some(_), Some(pre)) => parse_prerelease(text, pre.as_str())?,
            _ => Vec::new(),
        };

        Ok(Partial {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    fn version(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (Some(major), Some(minor), Some(patch)) => {
                Some(Version::new(major, minor, patch).with_prerelease(self.prerelease.clone()))
            }
            _ => None,
        }
    }
}

fn increment(value: u64, token: &str) -> Result<u64, RangeParseError> {
    value.checked_add(1).ok_or_else(|| RangeParseError::Overflow {
        comparator: token.to_string(),
    })
}

/// Parser for one AND-group of a range
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparatorParser {
    options: ParseOptions,
}

impl ComparatorParser {
    pub fn new(options: ParseOptions) -> Self {
        ComparatorParser { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse one AND-group into its comparators, in input order
    pub fn parse_group(&self, group: &str) -> Result<Vec<Comparator>, RangeParseError> {
        let group = group.trim();
        if group.is_empty() {
            return Ok(vec![self.any()]);
        }

        let comparators = if let Some(caps) = HYPHEN_RE.captures(group) {
            self.parse_hyphen(group, &caps[1], &caps[2])?
        } else {
            let mut comparators = Vec::new();
            for token in self.tokenize(group)? {
                comparators.extend(self.parse_token(&token)?);
            }
            comparators
        };

        Ok(normalize(comparators))
    }

    /// Split a group on whitespace and commas, gluing bare operators to the
    /// version that follows them
    fn tokenize(&self, group: &str) -> Result<Vec<String>, RangeParseError> {
        let mut tokens = Vec::new();
        let mut pending: Option<&str> = None;

        for piece in SEPARATOR_RE.split(group).filter(|p| !p.is_empty()) {
            match pending.take() {
                Some(operator) => tokens.push(format!("{}{}", operator, piece)),
                None if BARE_OPERATORS.contains(&piece) => pending = Some(piece),
                None => tokens.push(piece.to_string()),
            }
        }

        if let Some(operator) = pending {
            return Err(missing_version(operator));
        }

        Ok(tokens)
    }

    /// Expand one token into its comparators
    fn parse_token(&self, token: &str) -> Result<Vec<Comparator>, RangeParseError> {
        let (prefix, rest) = Prefix::split(token);
        if rest.is_empty() {
            return Err(missing_version(token));
        }

        let partial = Partial::parse(rest, token)?;
        let comparators = match prefix {
            Prefix::Tilde => self.expand_tilde(&partial, token)?,
            Prefix::Caret => self.expand_caret(&partial, token)?,
            Prefix::Primitive(operator) => self.expand_primitive(operator, &partial, token)?,
        };

        log::trace!("Expanded \"{}\" to [{}]", token, join(&comparators));
        Ok(comparators)
    }

    fn any(&self) -> Comparator {
        Comparator::any(self.options)
    }

    fn comparator(&self, operator: Operator, version: Version) -> Comparator {
        Comparator::new(operator, version, self.options)
    }

    fn lower(&self, major: u64, minor: u64, patch: u64) -> Comparator {
        self.comparator(Operator::GreaterThanOrEqual, Version::new(major, minor, patch))
    }

    fn upper(&self, major: u64, minor: u64, patch: u64) -> Comparator {
        self.comparator(Operator::LessThan, Version::new(major, minor, patch))
    }

    /// `>=` a complete version, keeping its prerelease
    fn lower_exact(&self, partial: &Partial, major: u64, minor: u64, patch: u64) -> Comparator {
        self.comparator(
            Operator::GreaterThanOrEqual,
            Version::new(major, minor, patch).with_prerelease(partial.prerelease.clone()),
        )
    }

    /// `=`, `<`, `<=`, `>`, `>=` followed by a version or x-range
    fn expand_primitive(
        &self,
        operator: Operator,
        partial: &Partial,
        token: &str,
    ) -> Result<Vec<Comparator>, RangeParseError> {
        if let Some(version) = partial.version() {
            return Ok(vec![self.comparator(operator, version)]);
        }

        let major = match partial.major {
            Some(major) => major,
            None => {
                return Ok(match operator {
                    Operator::GreaterThan | Operator::LessThan => {
                        vec![Comparator::none(self.options)]
                    }
                    _ => vec![self.any()],
                })
            }
        };

        let expanded = match (operator, partial.minor) {
            (Operator::Equal, None) => vec![self.lower(major, 0, 0), self.upper(increment(major, token)?, 0, 0)],
            (Operator::Equal, Some(minor)) => {
                vec![self.lower(major, minor, 0), self.upper(major, increment(minor, token)?, 0)]
            }
            (Operator::GreaterThan, None) => vec![self.lower(increment(major, token)?, 0, 0)],
            (Operator::GreaterThan, Some(minor)) => vec![self.lower(major, increment(minor, token)?, 0)],
            (Operator::GreaterThanOrEqual, minor) => vec![self.lower(major, minor.unwrap_or(0), 0)],
            (Operator::LessThanOrEqual, None) => vec![self.upper(increment(major, token)?, 0, 0)],
            (Operator::LessThanOrEqual, Some(minor)) => vec![self.upper(major, increment(minor, token)?, 0)],
            (Operator::LessThan, minor) => vec![self.upper(major, minor.unwrap_or(0), 0)],
        };
        Ok(expanded)
    }

    /// `~1.2.3` allows patch-level changes, `~1` minor-level ones
    fn expand_tilde(&self, partial: &Partial, token: &str) -> Result<Vec<Comparator>, RangeParseError> {
        let expanded = match (partial.major, partial.minor, partial.patch) {
            (None, _, _) => vec![self.any()],
            (Some(major), None, _) => vec![self.lower(major, 0, 0), self.upper(increment(major, token)?, 0, 0)],
            (Some(major), Some(minor), None) => {
                vec![self.lower(major, minor, 0), self.upper(major, increment(minor, token)?, 0)]
            }
            (Some(major), Some(minor), Some(patch)) => vec![
                self.lower_exact(partial, major, minor, patch),
                self.upper(major, increment(minor, token)?, 0),
            ],
        };
        Ok(expanded)
    }

    /// `^` allows changes that keep the left-most non-zero part
    fn expand_caret(&self, partial: &Partial, token: &str) -> Result<Vec<Comparator>, RangeParseError> {
        let (major, minor, patch) = match (partial.major, partial.minor, partial.patch) {
            (None, _, _) => return Ok(vec![self.any()]),
            (Some(major), None, _) => {
                return Ok(vec![self.lower(major, 0, 0), self.upper(increment(major, token)?, 0, 0)])
            }
            (Some(0), Some(minor), None) => {
                return Ok(vec![self.lower(0, minor, 0), self.upper(0, increment(minor, token)?, 0)])
            }
            (Some(major), Some(minor), None) => {
                return Ok(vec![self.lower(major, minor, 0), self.upper(increment(major, token)?, 0, 0)])
            }
            (Some(major), Some(minor), Some(patch)) => (major, minor, patch),
        };

        let upper = match (major, minor) {
            (0, 0) => self.upper(0, 0, increment(patch, token)?),
            (0, minor) => self.upper(0, increment(minor, token)?, 0),
            (major, _) => self.upper(increment(major, token)?, 0, 0),
        };

        Ok(vec![self.lower_exact(partial, major, minor, patch), upper])
    }

    /// `A - B`: inclusive on both ends, partial ends widened
    fn parse_hyphen(&self, group: &str, from: &str, to: &str) -> Result<Vec<Comparator>, RangeParseError> {
        let from = Partial::parse(from, group)?;
        let to = Partial::parse(to, group)?;
        let mut comparators = Vec::with_capacity(2);

        match (from.major, from.minor, from.patch) {
            (None, _, _) => {}
            (Some(major), None, _) => comparators.push(self.lower(major, 0, 0)),
            (Some(major), Some(minor), None) => comparators.push(self.lower(major, minor, 0)),
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(self.lower_exact(&from, major, minor, patch))
            }
        }

        match (to.major, to.minor, to.patch) {
            (None, _, _) => {}
            (Some(major), None, _) => comparators.push(self.upper(increment(major, group)?, 0, 0)),
            (Some(major), Some(minor), None) => comparators.push(self.upper(major, increment(minor, group)?, 0)),
            (Some(major), Some(minor), Some(patch)) => comparators.push(self.comparator(
                Operator::LessThanOrEqual,
                Version::new(major, minor, patch).with_prerelease(to.prerelease.clone()),
            )),
        }

        if comparators.is_empty() {
            comparators.push(self.any());
        }

        log::trace!("Expanded hyphen range \"{}\" to [{}]", group, join(&comparators));
        Ok(comparators)
    }
}

fn missing_version(operator: &str) -> RangeParseError {
    match operator {
        "~" | "~>" | "^" => RangeParseError::InvalidComparator {
            comparator: operator.to_string(),
            reason: "missing version".to_string(),
        },
        _ => RangeParseError::AnyWithOperator {
            operator: operator.to_string(),
        },
    }
}

/// Reduce a group: the nothing-sentinel wins, `*` next to real comparators
/// goes. Duplicates are left to [`crate::ComparatorSet::new`].
fn normalize(mut comparators: Vec<Comparator>) -> Vec<Comparator> {
    if let Some(none) = comparators.iter().find(|c| c.is_match_none()) {
        return vec![none.clone()];
    }

    if comparators.iter().any(|c| !c.is_any()) {
        comparators.retain(|c| !c.is_any());
    }
    comparators
}

fn join(comparators: &[Comparator]) -> String {
    comparators
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
