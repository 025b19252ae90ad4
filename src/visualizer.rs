//! Structural views over inspected values.
//!
//! A [`Visualizer`] is built by the [`Registry`](crate::Registry) for one value
//! and answers the three questions a debugger asks: a one-line summary
//! ([`Display`](fmt::Display), so `to_string()`), how to lay out the children
//! ([`display_hint`](Visualizer::display_hint)) and the children themselves
//! ([`children`](Visualizer::children)).

use std::{fmt, iter::FusedIterator};

use crate::{Error, OpaqueValue, Scalar};

mod bbox;
mod container;
mod expr;
mod indirection;

pub use bbox::BBox;
pub use container::{Container, ContainerKind, Shape, Sizing, Storage};
pub use expr::{BinaryFunc, UnaryFunc};
pub use indirection::Indirection;

/// How the host should lay out [`Visualizer::children`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayHint {
    #[default]
    None,
    Map,
    Array,
    String,
}

impl DisplayHint {
    /// The spelling debuggers use for the hint, or `None` for no hint.
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            DisplayHint::None => None,
            DisplayHint::Map => Some("map"),
            DisplayHint::Array => Some("array"),
            DisplayHint::String => Some("string"),
        }
    }
}

/// A leaf produced by a visualizer rather than read from memory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Literal {
    Scalar(Scalar),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Scalar(scalar) => scalar.fmt(f),
            Literal::Text(text) => f.write_str(text),
        }
    }
}

/// One entry of [`Visualizer::children`].
#[derive(Clone, Debug)]
pub enum Child<V> {
    /// A sub-value; the host passes it back through the registry to expand it.
    Value(V),
    Literal(Literal),
    /// Reading this entry failed. Siblings are unaffected.
    Error(Error),
}

impl<V> Child<V> {
    pub fn value(&self) -> Option<&V> {
        match self {
            Child::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Child::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl<V> From<crate::Result<V>> for Child<V> {
    #[inline]
    fn from(result: crate::Result<V>) -> Self {
        match result {
            Ok(value) => Child::Value(value),
            Err(error) => Child::Error(error),
        }
    }
}

/// Every shape of value this crate knows how to show.
#[derive(Clone, Debug)]
pub enum Visualizer<V> {
    Indirection(Indirection<V>),
    VectorBinaryFunc(BinaryFunc<V>),
    VectorUnaryFunc(UnaryFunc<V>),
    Container(Container<V>),
    BBox(BBox<V>),
}

impl<V: OpaqueValue> Visualizer<V> {
    /// The value this visualizer was built for.
    pub fn value(&self) -> &V {
        match self {
            Visualizer::Indirection(v) => v.value(),
            Visualizer::VectorBinaryFunc(v) => v.value(),
            Visualizer::VectorUnaryFunc(v) => v.value(),
            Visualizer::Container(v) => v.value(),
            Visualizer::BBox(v) => v.value(),
        }
    }

    pub fn display_hint(&self) -> DisplayHint {
        match self {
            Visualizer::Indirection(v) => v.target().display_hint(),
            Visualizer::VectorBinaryFunc(_) | Visualizer::VectorUnaryFunc(_) => DisplayHint::Map,
            Visualizer::Container(_) => DisplayHint::Array,
            Visualizer::BBox(_) => DisplayHint::Map,
        }
    }

    /// A lazy iterator over `(label, child)` pairs. Elements of vectors and
    /// matrices have an empty label.
    pub fn children(&self) -> Children<'_, V> {
        Children {
            visualizer: self.concrete(),
            position: 0,
        }
    }

    /// The vector or matrix behind this visualizer, looking through CRTP
    /// indirections.
    pub fn as_container(&self) -> Option<&Container<V>> {
        match self.concrete() {
            Visualizer::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn into_container(self) -> Result<Container<V>, Self> {
        match self {
            Visualizer::Container(container) => Ok(container),
            Visualizer::Indirection(indirection) => indirection.into_target().into_container(),
            other => Err(other),
        }
    }

    pub fn is_indirection(&self) -> bool {
        matches!(self, Visualizer::Indirection(_))
    }

    fn concrete(&self) -> &Visualizer<V> {
        match self {
            Visualizer::Indirection(v) => v.target().concrete(),
            other => other,
        }
    }

    fn child_count(&self) -> usize {
        match self {
            Visualizer::Indirection(v) => v.target().child_count(),
            Visualizer::VectorBinaryFunc(_) => 3,
            Visualizer::VectorUnaryFunc(_) => 2,
            Visualizer::Container(v) => v.len(),
            Visualizer::BBox(_) => 4,
        }
    }

    fn child(&self, position: usize) -> Option<(&'static str, Child<V>)> {
        match self {
            Visualizer::Indirection(v) => v.target().child(position),
            Visualizer::VectorBinaryFunc(v) => v.child(position),
            Visualizer::VectorUnaryFunc(v) => v.child(position),
            Visualizer::Container(v) => v.child(position),
            Visualizer::BBox(v) => v.child(position),
        }
    }
}

impl<V: OpaqueValue> fmt::Display for Visualizer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visualizer::Indirection(v) => v.target().fmt(f),
            Visualizer::VectorBinaryFunc(_) => f.write_str("VectorBinaryFunc"),
            Visualizer::VectorUnaryFunc(_) => f.write_str("VectorUnaryFunc"),
            Visualizer::Container(v) => v.fmt(f),
            Visualizer::BBox(_) => f.write_str("BBox"),
        }
    }
}

/// Iterator returned by [`Visualizer::children`].
///
/// Each child is read from the inspected value only when it is reached.
pub struct Children<'a, V> {
    visualizer: &'a Visualizer<V>,
    position: usize,
}

impl<V: OpaqueValue> Iterator for Children<'_, V> {
    type Item = (&'static str, Child<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.visualizer.child(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .visualizer
            .child_count()
            .saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<V: OpaqueValue> ExactSizeIterator for Children<'_, V> {}

impl<V: OpaqueValue> FusedIterator for Children<'_, V> {}
