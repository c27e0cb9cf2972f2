//! Parse options shared by every comparator of one parse call

use serde::{Deserialize, Serialize};

/// Options controlling how a range is parsed and matched
///
/// ```
/// use semrange::ParseOptions;
///
/// let options = ParseOptions::new().include_prerelease(true);
/// assert!(options.includes_prerelease());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    include_prerelease: bool,
}

impl ParseOptions {
    /// Default options: prereleases are only matched when a comparator
    /// in the same group explicitly names the same `major.minor.patch`
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow prerelease candidates to match any comparator
    pub fn include_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    pub fn includes_prerelease(&self) -> bool {
        self.include_prerelease
    }
}
