//! Sequential Identifiers
//!
//! Orders and tracking records are keyed by a fixed textual prefix followed by
//! a decimal counter (`gamerentalorder42`, `trackingid42`). The counter is
//! recovered by dropping every non-digit character, which matches how rows
//! written by older clients are read back.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use thiserror::Error;

/// Errors raised while reading or advancing an identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The text contains no digits to recover a counter from.
    #[error("identifier {0:?} has no numeric part")]
    MissingNumber(String),

    /// The numeric part does not fit into the counter type.
    #[error("identifier {0:?} is out of range")]
    OutOfRange(String),

    /// The counter cannot be advanced any further.
    #[error("identifier space exhausted after {0}")]
    Exhausted(u64),
}

/// Marker describing one family of identifiers.
pub trait IdKind {
    /// Literal prefix placed before the counter.
    const PREFIX: &'static str;
}

/// Marker for rental order identifiers.
#[derive(Debug)]
pub enum RentalOrderKind {}

impl IdKind for RentalOrderKind {
    const PREFIX: &'static str = "gamerentalorder";
}

/// Marker for tracking record identifiers.
#[derive(Debug)]
pub enum TrackingKind {}

impl IdKind for TrackingKind {
    const PREFIX: &'static str = "trackingid";
}

/// Rental order identifier, e.g. `gamerentalorder7`.
pub type OrderId = SequentialId<RentalOrderKind>;

/// Tracking record identifier, e.g. `trackingid7`.
pub type TrackingId = SequentialId<TrackingKind>;

/// Prefixed, monotonically allocated identifier.
pub struct SequentialId<K>(u64, PhantomData<K>);

impl<K: IdKind> SequentialId<K> {
    /// Build an identifier from its counter.
    pub const fn from_number(number: u64) -> Self {
        Self(number, PhantomData)
    }

    /// The counter behind the identifier.
    pub const fn number(self) -> u64 {
        self.0
    }

    /// Allocate the identifier following the current maximum counter.
    ///
    /// An empty table has no maximum, in which case the sequence starts at 1.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] when the counter would overflow.
    pub fn after(max: Option<u64>) -> Result<Self, IdError> {
        match max {
            None => Ok(Self::from_number(1)),
            Some(max) => max
                .checked_add(1)
                .map(Self::from_number)
                .ok_or(IdError::Exhausted(max)),
        }
    }

    /// The identifier immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] when the counter would overflow.
    pub fn next(self) -> Result<Self, IdError> {
        Self::after(Some(self.0))
    }
}

/// Recover the counter from any text by keeping only its ASCII digits.
///
/// # Errors
///
/// Returns an [`IdError`] when there are no digits or the number overflows.
pub fn numeric_part(text: &str) -> Result<u64, IdError> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(IdError::MissingNumber(text.to_string()));
    }

    digits
        .parse()
        .map_err(|_overflow| IdError::OutOfRange(text.to_string()))
}

impl<K: IdKind> FromStr for SequentialId<K> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        numeric_part(s.trim()).map(Self::from_number)
    }
}

impl<K> Clone for SequentialId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SequentialId<K> {}

impl<K: IdKind> Debug for SequentialId<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", K::PREFIX, self.0)
    }
}

impl<K: IdKind> Display for SequentialId<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", K::PREFIX, self.0)
    }
}

impl<K> PartialEq for SequentialId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K> Eq for SequentialId<K> {}

impl<K> Hash for SequentialId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<K> PartialOrd for SequentialId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for SequentialId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
