//! Comparator types for version matching

mod comparator;
mod comparator_set;
mod operator;

pub use comparator::Comparator;
pub use comparator_set::ComparatorSet;
pub use operator::{InvalidOperatorError, Operator};
