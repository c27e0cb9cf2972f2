//! Semantic version value type

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Longest version string accepted by the parser.
pub const MAX_LENGTH: usize = 256;

/// Error returned when a version string is not valid semver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version string \"{version}\": {reason}")]
pub struct InvalidVersionFormat {
    pub version: String,
    pub reason: String,
}

impl InvalidVersionFormat {
    fn new(version: &str, reason: impl Into<String>) -> Self {
        InvalidVersionFormat {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}

/// A single dot-separated prerelease identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Purely numeric identifier, compared numerically
    Numeric(u64),
    /// Identifier containing letters or hyphens, compared lexically
    AlphaNumeric(String),
}

impl Identifier {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Semantic version `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`
///
/// Equality, hashing and ordering ignore build metadata.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<String>,
}

impl Version {
    /// Create a release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse a strict semver string (a single leading `v` is allowed)
    pub fn parse(input: &str) -> Result<Self, InvalidVersionFormat> {
        let trimmed = input.trim();
        if trimmed.len() > MAX_LENGTH {
            return Err(InvalidVersionFormat::new(
                input,
                format!("longer than {} characters", MAX_LENGTH),
            ));
        }

        let text = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if text.is_empty() {
            return Err(InvalidVersionFormat::new(input, "empty version"));
        }

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, parse_build(input, build)?),
            None => (text, Vec::new()),
        };

        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, parse_prerelease(input, pre)?),
            None => (rest, Vec::new()),
        };

        let mut parts = core.split('.');
        let major = parse_component(input, parts.next(), "major")?;
        let minor = parse_component(input, parts.next(), "minor")?;
        let patch = parse_component(input, parts.next(), "patch")?;
        if parts.next().is_some() {
            return Err(InvalidVersionFormat::new(
                input,
                "expected exactly three numeric components",
            ));
        }

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }

    /// Replace the prerelease identifiers
    pub fn with_prerelease(mut self, prerelease: Vec<Identifier>) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Drop build metadata
    pub fn without_build(mut self) -> Self {
        self.build.clear();
        self
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[String] {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Check whether both versions share `major.minor.patch`
    pub fn same_triple(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Three-way comparison; an alias for [`Ord::cmp`]
    pub fn compare(&self, other: &Version) -> Ordering {
        self.cmp(other)
    }

    /// Compare only `major.minor.patch`
    pub fn compare_main(&self, other: &Version) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }

    /// Compare prerelease identifiers; a release sorts above any prerelease
    pub fn compare_pre(&self, other: &Version) -> Ordering {
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // Slice ordering: element-wise, then the shorter prefix first
            (false, false) => self.prerelease.cmp(&other.prerelease),
        }
    }
}

fn parse_component(input: &str, part: Option<&str>, name: &str) -> Result<u64, InvalidVersionFormat> {
    let part = match part {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(InvalidVersionFormat::new(
                input,
                format!("missing {} component", name),
            ))
        }
    };

    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidVersionFormat::new(
            input,
            format!("{} component \"{}\" is not a number", name, part),
        ));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(InvalidVersionFormat::new(
            input,
            format!("{} component \"{}\" has a leading zero", name, part),
        ));
    }

    part.parse().map_err(|_| {
        InvalidVersionFormat::new(input, format!("{} component \"{}\" is too large", name, part))
    })
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Parse dot-separated prerelease identifiers (the text after `-`)
pub(crate) fn parse_prerelease(input: &str, pre: &str) -> Result<Vec<Identifier>, InvalidVersionFormat> {
    let mut identifiers = Vec::new();

    for part in pre.split('.') {
        if part.is_empty() {
            return Err(InvalidVersionFormat::new(input, "empty prerelease identifier"));
        }
        if !part.bytes().all(is_identifier_byte) {
            return Err(InvalidVersionFormat::new(
                input,
                format!("invalid character in prerelease identifier \"{}\"", part),
            ));
        }

        if part.bytes().all(|b| b.is_ascii_digit()) {
            if part.len() > 1 && part.starts_with('0') {
                return Err(InvalidVersionFormat::new(
                    input,
                    format!("numeric prerelease identifier \"{}\" has a leading zero", part),
                ));
            }
            // Too large for u64: npm keeps such identifiers as strings
            match part.parse::<u64>() {
                Ok(n) => identifiers.push(Identifier::Numeric(n)),
                Err(_) => identifiers.push(Identifier::AlphaNumeric(part.to_string())),
            }
        } else {
            identifiers.push(Identifier::AlphaNumeric(part.to_string()));
        }
    }

    Ok(identifiers)
}

fn parse_build(input: &str, build: &str) -> Result<Vec<String>, InvalidVersionFormat> {
    build
        .split('.')
        .map(|part| {
            if part.is_empty() {
                Err(InvalidVersionFormat::new(input, "empty build identifier"))
            } else if !part.bytes().all(is_identifier_byte) {
                Err(InvalidVersionFormat::new(
                    input,
                    format!("invalid character in build identifier \"{}\"", part),
                ))
            } else {
                Ok(part.to_string())
            }
        })
        .collect()
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_main(other).then_with(|| self.compare_pre(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, id) in self.prerelease.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { '-' } else { '.' }, id)?;
        }
        for (i, id) in self.build.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { '+' } else { '.' }, id)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = InvalidVersionFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert!(!version.is_prerelease());
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let version = v("1.2.3-alpha.1+build.5");
        assert_eq!(
            version.prerelease(),
            &[Identifier::AlphaNumeric("alpha".to_string()), Identifier::Numeric(1)]
        );
        assert_eq!(version.build(), &["build".to_string(), "5".to_string()]);
        assert!(version.is_prerelease());
        assert_eq!(version.to_string(), "1.2.3-alpha.1+build.5");
    }

    #[test]
    fn test_parse_tolerates_v_prefix_and_whitespace() {
        assert_eq!(v(" v1.0.0 "), v("1.0.0"));
        assert_eq!(v("1.0.0-x-y-z.--"), v("1.0.0-x-y-z.--"));
        assert_eq!(v("1.0.0+001").build(), &["001".to_string()]);
    }

    #[test]
    fn test_parse_fails() {
        let invalid = [
            "",
            "v",
            "1",
            "1.2",
            "1.2.3.4",
            "01.2.3",
            "1.02.3",
            "1.2.03",
            "1.2.3-01",
            "1.2.3-",
            "1.2.3-alpha..1",
            "1.2.3-al$pha",
            "1.2.3+",
            "1.2.3+build..1",
            "a.b.c",
            "1.2.x",
            "=1.2.3",
            "18446744073709551616.0.0",
        ];
        for input in invalid {
            assert!(Version::parse(input).is_err(), "{} should be invalid", input);
        }
    }

    #[test]
    fn test_parse_rejects_long_input() {
        let long = format!("1.2.3-{}", "a".repeat(MAX_LENGTH));
        let err = Version::parse(&long).unwrap_err();
        assert!(err.reason.contains("longer than"));
    }

    #[test]
    fn test_large_numeric_prerelease_stays_alphanumeric() {
        let version = v("1.0.0-99999999999999999999");
        assert!(!version.prerelease()[0].is_numeric());
    }

    #[test]
    fn test_precedence_chain() {
        // Precedence example from semver.org
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
            "2.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
            assert_eq!(v(pair[1]).compare(&v(pair[0])), Ordering::Greater);
        }
    }

    #[test]
    fn test_numeric_components_compare_numerically() {
        assert!(v("1.2.10") > v("1.2.9"));
        assert!(v("10.0.0") > v("9.99.99"));
        assert!(v("18446744073709551615.0.0") > v("18446744073709551614.0.0"));
    }

    #[test]
    fn test_build_is_ignored() {
        assert_eq!(v("1.2.3+a"), v("1.2.3+b"));
        assert_eq!(v("1.2.3+a").compare(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_numeric_identifier_sorts_below_alphanumeric() {
        assert!(v("1.0.0-1") < v("1.0.0-a"));
        assert!(v("1.0.0-0") < v("1.0.0-0.0"));
        assert!(v("0.0.0-0") < v("0.0.0-alpha"));
    }

    #[test]
    fn test_same_triple() {
        assert!(v("1.2.3-beta").same_triple(&v("1.2.3-alpha")));
        assert!(!v("1.2.4-beta").same_triple(&v("1.2.3-alpha")));
    }

    #[test]
    fn test_serde_as_string() {
        let version = v("1.2.3-rc.1");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<Version>("\"1.2\"").is_err());
    }
}
