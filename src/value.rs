//! The contract between visualizers and the debugger's view of memory.

use std::fmt;

use crate::{Error, Result, Step, TypeSignature};

/// A handle to one value in the inspected program, paired with its type.
///
/// The host debugger provides the implementation. Every accessor may fail
/// (unreadable memory, unknown member, impossible cast) and must report that
/// through its `Result` without affecting other handles derived from the same
/// value.
pub trait OpaqueValue: Clone + Sized {
    /// The value's static type.
    fn signature(&self) -> &TypeSignature;

    /// The member called `name`.
    fn field(&self, name: &str) -> Result<Self>;

    /// Element `index` of a pointer or array value.
    fn index(&self, index: usize) -> Result<Self>;

    /// The same storage viewed as `target`.
    ///
    /// Only statically related types are allowed, such as a CRTP base viewed
    /// as its derived class.
    fn cast(&self, target: &TypeSignature) -> Result<Self>;

    /// Reads the value as an arithmetic scalar.
    fn scalar(&self) -> Result<Scalar>;

    /// Either [`field`](Self::field) or [`index`](Self::index), depending on the step.
    #[inline]
    fn get<'s>(&self, step: impl Into<Step<'s>>) -> Result<Self> {
        match step.into() {
            Step::Field(name) => self.field(name),
            Step::Element(index) => self.index(index),
        }
    }

    /// Follows a chain of steps, e.g. `["core_", "m_data", "px"]`.
    fn get_path<'s, S>(&self, path: &[S]) -> Result<Self>
    where
        S: Copy + Into<Step<'s>>,
    {
        path.iter().try_fold(self.clone(), |value, step| value.get(*step))
    }
}

/// An arithmetic value read out of inspected memory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// The value converted to an index or count.
    ///
    /// Negative, fractional and boolean values are rejected.
    pub fn as_usize(self) -> Option<usize> {
        match self {
            Scalar::Int(value) => usize::try_from(value).ok(),
            Scalar::UInt(value) => usize::try_from(value).ok(),
            Scalar::Float(_) | Scalar::Bool(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(value) => value as f64,
            Scalar::UInt(value) => value as f64,
            Scalar::Float(value) => value,
            Scalar::Bool(value) => f64::from(u8::from(value)),
        }
    }

    /// `self - rhs`, promoted the way C++ arithmetic would for the common cases.
    ///
    /// Floating point wins over integers; mixed or unsigned integers that
    /// would go negative produce a signed result; overflow is reported
    /// instead of wrapping.
    pub fn difference(self, rhs: Scalar) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::Float(_), _) | (_, Scalar::Float(_)) => {
                Ok(Scalar::Float(self.as_f64() - rhs.as_f64()))
            }
            (Scalar::UInt(a), Scalar::UInt(b)) if a >= b => Ok(Scalar::UInt(a - b)),
            _ => {
                let a = self.as_i128();
                let b = rhs.as_i128();
                a.checked_sub(b)
                    .and_then(|v| i64::try_from(v).ok())
                    .map(Scalar::Int)
                    .ok_or(Error::ArithmeticOverflow)
            }
        }
    }

    fn as_i128(self) -> i128 {
        match self {
            Scalar::Int(value) => i128::from(value),
            Scalar::UInt(value) => i128::from(value),
            Scalar::Bool(value) => i128::from(value),
            Scalar::Float(value) => value as i128,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => value.fmt(f),
            Scalar::UInt(value) => value.fmt(f),
            Scalar::Float(value) => value.fmt(f),
            Scalar::Bool(value) => value.fmt(f),
        }
    }
}
