//! Scalar domain values.
//!
//! Values are compared by exact identity. A `Real` is a finite `f64` whose
//! equality, hashing and ordering all go through its bit pattern, so
//! `-0.5` in a domain only ever matches `-0.5`. There is no tolerance here;
//! any epsilon logic belongs to whatever consumes the generated vectors.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Errors constructing a scalar value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("real value must be finite, got {value}")]
    NonFinite { value: f64 },
}

/// A finite floating-point value with identity semantics.
///
/// `-0.0` is folded into `0.0` on construction so the two spellings are the
/// same domain value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Real(f64);

impl Real {
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NonFinite { value });
        }
        Ok(Self::fold(value))
    }

    /// Caller guarantees `value` is finite.
    pub(crate) const fn from_finite(value: f64) -> Self {
        Self(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    fn fold(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }
}

impl TryFrom<f64> for Real {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Real::new(value)
    }
}

impl From<Real> for f64 {
    fn from(real: Real) -> f64 {
        real.0
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for Real {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete value from a parameter domain.
///
/// In JSON, `true`/`false` decode as `Bool`, integer literals as `Int`,
/// literals with a fraction or exponent as `Real`, strings as `Enum`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Bool(bool),
    Int(i64),
    Real(Real),
    Enum(String),
}

impl DomainValue {
    /// Build a real-valued domain entry, rejecting NaN and infinities.
    pub fn real(value: f64) -> Result<Self, ValueError> {
        Ok(DomainValue::Real(Real::new(value)?))
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DomainValue::Int(i) => Some(*i as f64),
            DomainValue::Real(r) => Some(r.get()),
            DomainValue::Bool(_) | DomainValue::Enum(_) => None,
        }
    }
}

impl From<i64> for DomainValue {
    fn from(value: i64) -> Self {
        DomainValue::Int(value)
    }
}

impl From<bool> for DomainValue {
    fn from(value: bool) -> Self {
        DomainValue::Bool(value)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        DomainValue::Enum(value.to_string())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        DomainValue::Enum(value)
    }
}

impl From<Real> for DomainValue {
    fn from(value: Real) -> Self {
        DomainValue::Real(value)
    }
}

impl std::fmt::Display for DomainValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainValue::Bool(b) => write!(f, "{b}"),
            DomainValue::Int(i) => write!(f, "{i}"),
            DomainValue::Real(r) => write!(f, "{r}"),
            DomainValue::Enum(s) => write!(f, "{s}"),
        }
    }
}
