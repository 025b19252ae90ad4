//! Error types for signature parsing, value access and visualizer construction.
//!
//! This module contains the [`Error`] type which represents every failure the
//! crate can report. Most of them never reach the host: a failing rule
//! constructor only means the rule does not apply, and failures while computing
//! derived fields are turned into inline text.
//!
//! # Example
//!
//! ```
//! use vw_pretty::{Error, parse};
//!
//! match parse("vw::math::Vector<double, 3") {
//!     Err(Error::MalformedSignature { position, .. }) => assert_eq!(position, 26),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use std::fmt::{self, Display};

use crate::Scalar;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur while parsing a
/// type signature, reading an inspected value or building a visualizer.
///
/// # Variants
///
/// - [`MalformedSignature`](Error::MalformedSignature) - The signature text violates `Name<Arg, ...>`
/// - [`MissingField`](Error::MissingField) .. [`NotScalar`](Error::NotScalar) - Accessor failures
/// - [`DepthExceeded`](Error::DepthExceeded) - The nesting bound was reached
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The signature does not follow the generic-class grammar.
    ///
    /// `position` is the byte offset into `signature` where parsing stopped.
    MalformedSignature {
        signature: String,
        position: usize,
        reason: &'static str,
    },

    /// The value's type has no field with the requested name.
    MissingField { ty: String, field: String },

    /// Indexed access on a value that is neither a pointer nor an array.
    NotIndexable(String),

    /// Indexed access past the end of a fixed-size array.
    IndexOutOfBounds { index: usize, len: usize },

    /// The bytes backing a value are not readable.
    ///
    /// This is what a dangling or uninitialised pointer in the inspected
    /// process turns into.
    InvalidAddress { address: u64, len: usize },

    /// The requested reinterpretation is not a statically valid relationship.
    InvalidCast { from: String, to: String },

    /// No layout is known for the type.
    UnknownType(String),

    /// A scalar was requested from a value that is not one.
    NotScalar(String),

    /// The value does not resolve to a vector or matrix visualizer.
    NotAContainer(String),

    /// No rule produced a visualizer for the type.
    Unresolved(String),

    /// A live size field holds something that cannot be a length.
    InvalidSize(Scalar),

    /// A derived value could not be represented.
    ArithmeticOverflow,

    /// Resolution went deeper than the configured bound.
    DepthExceeded(usize),

    /// The process-wide registry was installed twice.
    AlreadyInitialized,
}

impl Error {
    pub(crate) fn malformed(signature: &str, position: usize, reason: &'static str) -> Self {
        Error::MalformedSignature {
            signature: signature.to_owned(),
            position,
            reason,
        }
    }

    /// Returns `true` for failures reported by an [`OpaqueValue`](crate::OpaqueValue).
    pub const fn is_access_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. }
                | Error::NotIndexable(_)
                | Error::IndexOutOfBounds { .. }
                | Error::InvalidAddress { .. }
                | Error::InvalidCast { .. }
                | Error::UnknownType(_)
                | Error::NotScalar(_)
        )
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedSignature {
                signature,
                position,
                reason,
            } => write!(
                formatter,
                "malformed type signature `{signature}` at offset {position}: {reason}"
            ),
            Error::MissingField { ty, field } => {
                write!(formatter, "there is no member named {field} in {ty}")
            }
            Error::NotIndexable(ty) => write!(formatter, "cannot subscript a value of type {ty}"),
            Error::IndexOutOfBounds { index, len } => {
                write!(formatter, "index {index} out of bounds for length {len}")
            }
            Error::InvalidAddress { address, len } => write!(
                formatter,
                "cannot access memory at address {address:#x} ({len} bytes)"
            ),
            Error::InvalidCast { from, to } => {
                write!(formatter, "invalid cast from {from} to {to}")
            }
            Error::UnknownType(ty) => write!(formatter, "no layout known for type {ty}"),
            Error::NotScalar(ty) => write!(formatter, "value of type {ty} is not a scalar"),
            Error::NotAContainer(ty) => {
                write!(formatter, "value of type {ty} is not a vector or matrix")
            }
            Error::Unresolved(ty) => write!(formatter, "no visualizer applies to {ty}"),
            Error::InvalidSize(size) => write!(formatter, "invalid container size {size}"),
            Error::ArithmeticOverflow => formatter.write_str("arithmetic overflow"),
            Error::DepthExceeded(depth) => {
                write!(formatter, "nesting depth limit of {depth} exceeded")
            }
            Error::AlreadyInitialized => {
                formatter.write_str("formatter registry already initialized")
            }
        }
    }
}

impl std::error::Error for Error {}
