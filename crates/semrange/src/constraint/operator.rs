//! Operator types for comparators

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Comparison operators for comparators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=, or no operator at all)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Apply the operator to the result of `candidate.cmp(target)`
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl FromStr for Operator {
    type Err = InvalidOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "=" => Ok(Operator::Equal),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("".parse::<Operator>().unwrap(), Operator::Equal);
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Equal);
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::LessThanOrEqual);
        assert_eq!(">".parse::<Operator>().unwrap(), Operator::GreaterThan);
        assert!("==".parse::<Operator>().is_err());
        assert!("!=".parse::<Operator>().is_err());
        assert!("~".parse::<Operator>().is_err());
    }

    #[test]
    fn test_accepts() {
        assert!(Operator::LessThan.accepts(Ordering::Less));
        assert!(!Operator::LessThan.accepts(Ordering::Equal));
        assert!(Operator::LessThanOrEqual.accepts(Ordering::Equal));
        assert!(!Operator::GreaterThan.accepts(Ordering::Equal));
        assert!(Operator::GreaterThanOrEqual.accepts(Ordering::Greater));
        assert!(Operator::Equal.accepts(Ordering::Equal));
        assert!(!Operator::Equal.accepts(Ordering::Less));
    }
}
