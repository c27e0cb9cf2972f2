//! Parsed ranges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constraint::{Comparator, ComparatorSet};
use crate::range_parser::{RangeParseError, RangeParser};
use crate::version::Version;
use crate::ParseOptions;

/// A set of comparator groups joined with OR
///
/// Every comparator belongs to exactly one group; the group is what a
/// comparator consults when deciding whether a prerelease may pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    groups: Vec<ComparatorSet>,
    options: ParseOptions,
}

impl Range {
    /// Parse range text with the given options
    pub fn parse(text: &str, options: ParseOptions) -> Result<Self, RangeParseError> {
        RangeParser::new(options).parse(text)
    }

    pub(crate) fn from_groups(groups: Vec<ComparatorSet>, options: ParseOptions) -> Self {
        Range { groups, options }
    }

    /// The range matching every version (`*`)
    pub fn any(options: ParseOptions) -> Self {
        Range::from_groups(vec![ComparatorSet::new(vec![Comparator::any(options)])], options)
    }

    /// The range matching no version (`<0.0.0-0`)
    pub fn none(options: ParseOptions) -> Self {
        Range::from_groups(vec![ComparatorSet::new(vec![Comparator::none(options)])], options)
    }

    pub fn groups(&self) -> &[ComparatorSet] {
        &self.groups
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Comparators of the group at `index`, i.e. the siblings of every
    /// comparator in that group
    pub fn siblings(&self, index: usize) -> &[Comparator] {
        self.groups
            .get(index)
            .map(ComparatorSet::comparators)
            .unwrap_or(&[])
    }

    /// All comparators with the index of the group owning them
    pub fn comparators(&self) -> impl Iterator<Item = (usize, &Comparator)> {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(index, group)| group.comparators().iter().map(move |c| (index, c)))
    }

    /// Whether any group accepts the candidate
    pub fn includes(&self, candidate: &Version) -> bool {
        self.groups.iter().any(|group| group.includes(candidate))
    }

    /// Parse `candidate` and check it; unparsable versions never match
    pub fn includes_str(&self, candidate: &str) -> bool {
        match Version::parse(candidate) {
            Ok(version) => self.includes(&version),
            Err(_) => false,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self.groups.as_slice(), [only] if only.is_match_all())
    }

    pub fn is_match_none(&self) -> bool {
        matches!(self.groups.as_slice(), [only] if only.is_match_none())
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::any(ParseOptions::default())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, "||")?;
            }
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeParser::default().parse(s)
    }
}

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
