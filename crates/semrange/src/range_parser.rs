use thiserror::Error;

use crate::comparator_parser::ComparatorParser;
use crate::constraint::{Comparator, ComparatorSet};
use crate::range::Range;
use crate::version::InvalidVersionFormat;
use crate::ParseOptions;

/// Error type for range parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("Could not parse comparator \"{comparator}\": {reason}")]
    InvalidComparator { comparator: String, reason: String },
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersionFormat),
    #[error("Operator \"{operator}\" must be followed by a version")]
    AnyWithOperator { operator: String },
    #[error("Version number overflow while expanding \"{comparator}\"")]
    Overflow { comparator: String },
}

/// Parses range text (`^1.2.3 || >=2.0.0 <3.0.0`) into a [`Range`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeParser {
    options: ParseOptions,
}

impl RangeParser {
    pub fn new(options: ParseOptions) -> Self {
        RangeParser { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a range
    ///
    /// Groups are separated by `||`. A blank group matches everything, so
    /// `""` and `"||"` both parse to `*`.
    pub fn parse(&self, text: &str) -> Result<Range, RangeParseError> {
        let raw_groups: Vec<&str> = text.split("||").collect();

        if raw_groups.iter().all(|group| group.trim().is_empty()) {
            log::debug!("Range \"{}\" is blank, matching everything", text);
            return Ok(Range::any(self.options));
        }

        let parser = ComparatorParser::new(self.options);
        let mut groups = Vec::with_capacity(raw_groups.len());
        for group in raw_groups {
            groups.push(ComparatorSet::new(parser.parse_group(group)?));
        }

        Ok(Range::from_groups(self.simplify(text, groups), self.options))
    }

    /// A group matching everything absorbs the whole range; failing that, a
    /// group matching nothing does
    fn simplify(&self, text: &str, groups: Vec<ComparatorSet>) -> Vec<ComparatorSet> {
        if groups.iter().any(|group| group.is_match_all()) {
            log::debug!("Range \"{}\" contains a match-all group", text);
            return vec![ComparatorSet::new(vec![Comparator::any(self.options)])];
        }

        if let Some(none) = groups.iter().find(|group| group.is_match_none()) {
            log::debug!("Range \"{}\" contains a match-none group", text);
            return vec![none.clone()];
        }

        groups
    }
}

/// Parse a range with the given options
pub fn parse_range(text: &str, options: ParseOptions) -> Result<Range, RangeParseError> {
    RangeParser::new(options).parse(text)
}
