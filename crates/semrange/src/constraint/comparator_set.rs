//! ComparatorSet - the comparators of one AND-group

use std::fmt;

use super::Comparator;
use crate::version::Version;

/// Comparators joined with AND; every comparator sees the others of the set
/// as its siblings for prerelease gating
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparatorSet {
    comparators: Vec<Comparator>,
}

impl ComparatorSet {
    /// Build a set, removing exact duplicates (first occurrence wins)
    pub fn new(comparators: Vec<Comparator>) -> Self {
        let mut unique: Vec<Comparator> = Vec::with_capacity(comparators.len());
        for comparator in comparators {
            if !unique.contains(&comparator) {
                unique.push(comparator);
            }
        }
        ComparatorSet { comparators: unique }
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// A single `*` or `>=0.0.0`
    pub fn is_match_all(&self) -> bool {
        matches!(self.comparators.as_slice(), [only] if only.is_match_all())
    }

    /// A single `<0.0.0-0`
    pub fn is_match_none(&self) -> bool {
        matches!(self.comparators.as_slice(), [only] if only.is_match_none())
    }

    /// Check a candidate against every comparator of the set
    pub fn includes(&self, candidate: &Version) -> bool {
        self.comparators
            .iter()
            .all(|comparator| comparator.includes_in(candidate, &self.comparators))
    }
}

impl fmt::Display for ComparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comparator) in self.comparators.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", comparator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOptions;

    fn set(parts: &[&str]) -> ComparatorSet {
        ComparatorSet::new(parts.iter().map(|p| p.parse().unwrap()).collect())
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_deduplicates_keeping_order() {
        let group = set(&[">=1.0.0", "<2.0.0", ">=1.0.0", "<2.0.0"]);
        assert_eq!(group.len(), 2);
        assert_eq!(group.to_string(), ">=1.0.0 <2.0.0");
    }

    #[test]
    fn test_includes_all() {
        let group = set(&[">=1.0.0", "<2.0.0"]);
        assert!(group.includes(&v("1.9.9")));
        assert!(!group.includes(&v("2.0.0")));
        assert!(!group.includes(&v("0.9.0")));
    }

    #[test]
    fn test_empty_set_is_vacuously_true() {
        let group = ComparatorSet::new(Vec::new());
        assert!(group.is_empty());
        assert!(group.includes(&v("1.0.0")));
    }

    #[test]
    fn test_sibling_unlocks_prerelease() {
        let group = set(&[">=1.5.0-alpha", "<2.0.0"]);
        assert!(group.includes(&v("1.5.0-beta")));
        assert!(!group.includes(&v("1.6.0-beta")));
    }

    #[test]
    fn test_match_all_and_none() {
        assert!(set(&["*"]).is_match_all());
        assert!(set(&[">=0.0.0"]).is_match_all());
        assert!(!set(&[">=0.0.0", "<1.0.0"]).is_match_all());
        assert!(set(&["<0.0.0-0"]).is_match_none());
        assert!(ComparatorSet::new(vec![Comparator::none(ParseOptions::default())]).is_match_none());
    }
}
