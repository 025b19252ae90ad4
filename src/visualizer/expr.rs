use crate::{Child, OpaqueValue, Result};

/// A lazily evaluated `func(v1[i], v2[i])` over two vectors.
///
/// Shown as its operands and functor rather than the (unevaluated) result.
#[derive(Clone, Debug)]
pub struct BinaryFunc<V> {
    value: V,
    lhs: V,
    rhs: V,
    func: V,
}

impl<V: OpaqueValue> BinaryFunc<V> {
    pub fn new(value: &V) -> Result<Self> {
        Ok(Self {
            value: value.clone(),
            lhs: value.field("v1")?,
            rhs: value.field("v2")?,
            func: value.field("func")?,
        })
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(super) fn child(&self, position: usize) -> Option<(&'static str, Child<V>)> {
        let (label, value) = match position {
            0 => ("lhs", &self.lhs),
            1 => ("rhs", &self.rhs),
            2 => ("func", &self.func),
            _ => return None,
        };
        Some((label, Child::Value(value.clone())))
    }
}

/// A lazily evaluated `func(v[i])` over one vector.
#[derive(Clone, Debug)]
pub struct UnaryFunc<V> {
    value: V,
    operand: V,
    func: V,
}

impl<V: OpaqueValue> UnaryFunc<V> {
    pub fn new(value: &V) -> Result<Self> {
        Ok(Self {
            value: value.clone(),
            operand: value.field("v")?,
            func: value.field("func")?,
        })
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(super) fn child(&self, position: usize) -> Option<(&'static str, Child<V>)> {
        let (label, value) = match position {
            0 => ("v", &self.operand),
            1 => ("func", &self.func),
            _ => return None,
        };
        Some((label, Child::Value(value.clone())))
    }
}
