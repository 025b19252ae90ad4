use tracing::trace;

use crate::{Error, OpaqueValue, Registry, Result, Visualizer, registry::Context};

/// A CRTP base such as `vw::math::VectorBase<Derived>`, shown as `Derived`.
///
/// Viewing the base as its derived type and handing it back to the debugger
/// would loop forever, since the derived value still contains the base. The
/// derived view is therefore resolved up front with the indirection rule
/// switched off, and this visualizer only exists when that probe finds a
/// concrete visualizer to delegate to.
#[derive(Clone, Debug)]
pub struct Indirection<V> {
    value: V,
    target: Box<Visualizer<V>>,
}

impl<V: OpaqueValue> Indirection<V> {
    pub(crate) fn new(value: &V, registry: &Registry, context: Context) -> Result<Self> {
        let signature = value.signature();
        if context.probing {
            return Err(Error::Unresolved(signature.to_string()));
        }
        let derived = signature
            .type_argument(0)
            .ok_or_else(|| Error::Unresolved(signature.to_string()))?;
        let cast = value.cast(derived)?;

        match registry.resolve_in(&cast, context.probe()) {
            Some(target) if !target.is_indirection() => Ok(Self {
                value: value.clone(),
                target: Box::new(target),
            }),
            _ => {
                trace!(base = %signature, %derived, "derived view has no concrete visualizer");
                Err(Error::Unresolved(derived.to_string()))
            }
        }
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The visualizer of the derived view.
    #[inline]
    pub fn target(&self) -> &Visualizer<V> {
        &self.target
    }

    pub fn into_target(self) -> Visualizer<V> {
        *self.target
    }
}
