//! Single comparator implementation

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Operator;
use crate::range_parser::RangeParseError;
use crate::version::{Identifier, Version};
use crate::ParseOptions;

/// A single version comparator (e.g. `>=1.2.3`), or the match-any `*`
///
/// A comparator never carries an operator without a target version: the
/// match-any case is its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Matches every version (subject to prerelease gating)
    Any { options: ParseOptions },
    /// Operator applied to a target version
    Exact {
        operator: Operator,
        version: Version,
        options: ParseOptions,
    },
}

impl Comparator {
    /// Create a comparator; build metadata on the target is discarded
    pub fn new(operator: Operator, version: Version, options: ParseOptions) -> Self {
        Comparator::Exact {
            operator,
            version: version.without_build(),
            options,
        }
    }

    /// Create the match-any comparator
    pub fn any(options: ParseOptions) -> Self {
        Comparator::Any { options }
    }

    /// Create the comparator no version satisfies: `<0.0.0-0`
    ///
    /// `0.0.0-0` is the lowest valid version, since the numeric identifier
    /// `0` sorts below every other prerelease identifier.
    pub fn none(options: ParseOptions) -> Self {
        Comparator::new(
            Operator::LessThan,
            Version::new(0, 0, 0).with_prerelease(vec![Identifier::Numeric(0)]),
            options,
        )
    }

    /// Parse a single comparator in canonical form (`*`, `1.2.3`, `>=1.2.3`, ...)
    ///
    /// Shorthand forms such as `~1.2` or `1.x` expand to several comparators
    /// and are handled by [`crate::ComparatorParser`] instead.
    pub fn parse(text: &str, options: ParseOptions) -> Result<Self, RangeParseError> {
        let text = text.trim();
        if text.is_empty() || text == "*" {
            return Ok(Comparator::any(options));
        }

        let split = text
            .find(|c: char| c != '<' && c != '>' && c != '=')
            .unwrap_or(text.len());
        let (operator_str, version_str) = text.split_at(split);
        let operator: Operator = operator_str.parse().map_err(|_| RangeParseError::InvalidComparator {
            comparator: text.to_string(),
            reason: format!("unknown operator \"{}\"", operator_str),
        })?;

        let version_str = version_str.trim();
        if version_str.is_empty() {
            return Err(RangeParseError::AnyWithOperator {
                operator: operator_str.to_string(),
            });
        }

        let version = Version::parse(version_str)?;
        Ok(Comparator::new(operator, version, options))
    }

    pub fn options(&self) -> ParseOptions {
        match self {
            Comparator::Any { options } | Comparator::Exact { options, .. } => *options,
        }
    }

    /// Operator, or `None` for the match-any comparator
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Comparator::Any { .. } => None,
            Comparator::Exact { operator, .. } => Some(*operator),
        }
    }

    /// Target version, or `None` for the match-any comparator
    pub fn version(&self) -> Option<&Version> {
        match self {
            Comparator::Any { .. } => None,
            Comparator::Exact { version, .. } => Some(version),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Comparator::Any { .. })
    }

    /// True for `*` and its equivalent `>=0.0.0`
    pub fn is_match_all(&self) -> bool {
        match self {
            Comparator::Any { .. } => true,
            Comparator::Exact {
                operator: Operator::GreaterThanOrEqual,
                version,
                ..
            } => *version == Version::new(0, 0, 0),
            Comparator::Exact { .. } => false,
        }
    }

    /// True for the `<0.0.0-0` sentinel
    pub fn is_match_none(&self) -> bool {
        *self == Comparator::none(self.options())
    }

    /// Compare a candidate against the target version
    pub fn compare(&self, candidate: &Version) -> Option<Ordering> {
        self.version().map(|target| candidate.cmp(target))
    }

    /// Whether this comparator's target lets `candidate`, a prerelease,
    /// through the prerelease gate
    fn unlocks(&self, candidate: &Version) -> bool {
        match self.version() {
            Some(target) => target.is_prerelease() && target.same_triple(candidate),
            None => false,
        }
    }

    /// Check a candidate against this comparator alone
    pub fn includes(&self, candidate: &Version) -> bool {
        self.includes_in(candidate, &[])
    }

    /// Check a candidate against this comparator, with `siblings` being the
    /// other comparators of the same AND-group
    pub fn includes_in(&self, candidate: &Version, siblings: &[Comparator]) -> bool {
        if candidate.is_prerelease()
            && !self.options().includes_prerelease()
            && !self.unlocks(candidate)
            && !siblings.iter().any(|c| c.unlocks(candidate))
        {
            return false;
        }

        match self {
            Comparator::Any { .. } => true,
            Comparator::Exact {
                operator, version, ..
            } => operator.accepts(candidate.cmp(version)),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Any { .. } => write!(f, "*"),
            Comparator::Exact {
                operator: Operator::Equal,
                version,
                ..
            } => write!(f, "{}", version),
            Comparator::Exact {
                operator, version, ..
            } => write!(f, "{}{}", operator, version),
        }
    }
}

impl FromStr for Comparator {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::parse(s, ParseOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn c(s: &str) -> Comparator {
        s.parse().unwrap()
    }

    #[test]
    fn test_comparator_parse() {
        assert_eq!(
            c(">=1.2.3"),
            Comparator::new(Operator::GreaterThanOrEqual, v("1.2.3"), ParseOptions::default())
        );
        assert_eq!(c("1.2.3").operator(), Some(Operator::Equal));
        assert_eq!(c("=1.2.3"), c("1.2.3"));
        assert_eq!(c("< 2.0.0").operator(), Some(Operator::LessThan));
        assert!(c("*").is_any());
        assert!(c("").is_any());
    }

    #[test]
    fn test_comparator_parse_strips_build() {
        assert_eq!(c("1.2.3+build").to_string(), "1.2.3");
        assert_eq!(c("1.2.3+build"), c("1.2.3"));
    }

    #[test]
    fn test_comparator_parse_fails() {
        assert!(matches!(
            ">=".parse::<Comparator>(),
            Err(RangeParseError::AnyWithOperator { .. })
        ));
        assert!(matches!(
            "=>1.2.3".parse::<Comparator>(),
            Err(RangeParseError::InvalidComparator { .. })
        ));
        assert!(matches!(
            ">=1.2".parse::<Comparator>(),
            Err(RangeParseError::InvalidVersion(_))
        ));
        assert!("~1.2.3".parse::<Comparator>().is_err());
    }

    #[test]
    fn test_comparator_display() {
        assert_eq!(c(">=1.0.0").to_string(), ">=1.0.0");
        assert_eq!(c("<2.0.0-0").to_string(), "<2.0.0-0");
        assert_eq!(c("=1.2.3-alpha.1").to_string(), "1.2.3-alpha.1");
        assert_eq!(c("*").to_string(), "*");
    }

    #[test]
    fn test_canonical_text_round_trip() {
        let options = ParseOptions::new().include_prerelease(true);
        for text in ["*", "1.2.3", ">1.2.3", ">=1.2.3-rc.1", "<0.0.0-0", "<=4.5.6"] {
            let comparator = Comparator::parse(text, options).unwrap();
            let again = Comparator::parse(&comparator.to_string(), options).unwrap();
            assert_eq!(comparator, again);
        }
    }

    #[test]
    fn test_equality_includes_options() {
        let plain = Comparator::parse(">=1.0.0", ParseOptions::default()).unwrap();
        let pre = Comparator::parse(">=1.0.0", ParseOptions::new().include_prerelease(true)).unwrap();
        assert_ne!(plain, pre);
    }

    #[test]
    fn test_includes_operators() {
        assert!(c(">=1.0.0").includes(&v("1.0.0")));
        assert!(!c(">1.0.0").includes(&v("1.0.0")));
        assert!(c("<2.0.0").includes(&v("1.9.9")));
        assert!(!c("<2.0.0").includes(&v("2.0.0")));
        assert!(c("<=2.0.0").includes(&v("2.0.0")));
        assert!(c("1.2.3").includes(&v("1.2.3+build")));
        assert!(c("*").includes(&v("999.999.999")));
    }

    #[test]
    fn test_prerelease_gating() {
        // Target is a prerelease on the same triple
        assert!(c(">=1.2.3-alpha").includes(&v("1.2.3-beta")));
        // Different triple stays locked
        assert!(!c(">=1.2.3-alpha").includes(&v("1.2.4-beta")));
        assert!(!c(">=1.0.0").includes(&v("1.5.0-beta")));
        assert!(!c("*").includes(&v("1.0.0-beta")));

        let options = ParseOptions::new().include_prerelease(true);
        assert!(Comparator::parse(">=1.0.0", options).unwrap().includes(&v("1.5.0-beta")));
        assert!(Comparator::any(options).includes(&v("1.0.0-beta")));
    }

    #[test]
    fn test_prerelease_unlocked_by_sibling() {
        let lower = c(">=1.5.0-alpha");
        let upper = c("<2.0.0");
        let group = [lower.clone(), upper.clone()];

        assert!(upper.includes_in(&v("1.5.0-beta"), &group));
        assert!(!upper.includes(&v("1.5.0-beta")));
    }

    #[test]
    fn test_match_all_and_none() {
        assert!(c("*").is_match_all());
        assert!(c(">=0.0.0").is_match_all());
        assert!(!c(">0.0.0").is_match_all());
        assert!(c("<0.0.0-0").is_match_none());
        assert!(Comparator::none(ParseOptions::default()).is_match_none());
        assert!(!c("<0.0.0").is_match_none());

        let none = Comparator::none(ParseOptions::new().include_prerelease(true));
        assert!(!none.includes(&v("0.0.0-0")));
        assert!(!none.includes(&v("0.0.0")));
    }

    #[test]
    fn test_compare() {
        assert_eq!(c("1.2.3").compare(&v("1.2.4")), Some(Ordering::Greater));
        assert_eq!(c("1.2.3").compare(&v("1.2.3-rc")), Some(Ordering::Less));
        assert_eq!(c("*").compare(&v("1.2.3")), None);
    }
}
