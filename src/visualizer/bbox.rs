use crate::{
    Child, Container, Error, Literal, OpaqueValue, Registry, Result, Scalar, registry::Context,
};

/// An axis-aligned bounding box with its width and height.
///
/// The corners are required; the extents are derived and each one fails on its
/// own, turning into a `Failed to calc: ...` string. Corners are resolved
/// against container rules only.
#[derive(Clone, Debug)]
pub struct BBox<V> {
    value: V,
    min: V,
    max: V,
    min_corner: Result<Container<V>>,
    max_corner: Result<Container<V>>,
}

impl<V: OpaqueValue> BBox<V> {
    pub(crate) fn new(value: &V, registry: &Registry, context: Context) -> Result<Self> {
        let min = value.field("m_min")?;
        let max = value.field("m_max")?;
        let corner = |corner: &V| {
            registry
                .resolve_in(corner, context.corner())
                .ok_or_else(|| Error::Unresolved(corner.signature().to_string()))?
                .into_container()
                .map_err(|_| Error::NotAContainer(corner.signature().to_string()))
        };
        Ok(Self {
            value: value.clone(),
            min_corner: corner(&min),
            max_corner: corner(&max),
            min,
            max,
        })
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn min(&self) -> &V {
        &self.min
    }

    #[inline]
    pub fn max(&self) -> &V {
        &self.max
    }

    /// `max[axis] - min[axis]`.
    pub fn extent(&self, axis: usize) -> Result<Scalar> {
        let min = self.min_corner.as_ref().map_err(Clone::clone)?;
        let max = self.max_corner.as_ref().map_err(Clone::clone)?;
        let lo = min.element(axis)?.scalar()?;
        let hi = max.element(axis)?.scalar()?;
        hi.difference(lo)
    }

    pub fn width(&self) -> Result<Scalar> {
        self.extent(0)
    }

    pub fn height(&self) -> Result<Scalar> {
        self.extent(1)
    }

    pub(super) fn child(&self, position: usize) -> Option<(&'static str, Child<V>)> {
        let (label, extent) = match position {
            0 => return Some(("min", Child::Value(self.min.clone()))),
            1 => return Some(("max", Child::Value(self.max.clone()))),
            2 => ("width", self.width()),
            3 => ("height", self.height()),
            _ => return None,
        };
        let literal = match extent {
            Ok(scalar) => Literal::Scalar(scalar),
            Err(error) => Literal::Text(format!("Failed to calc: {error}")),
        };
        Some((label, Child::Literal(literal)))
    }
}
