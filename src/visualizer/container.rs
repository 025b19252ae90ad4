use std::fmt;

use crate::{Child, Error, OpaqueValue, Result};

/// Number of size dimensions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
    Vector,
    Matrix,
}

/// Where the element pointer lives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Storage {
    /// The container owns its elements (`Vector`, `Matrix`).
    Owning,
    /// A non-owning view over external storage (`VectorProxy`, `MatrixProxy`).
    Proxy,
}

/// Whether the size is part of the type or stored in the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sizing {
    /// Positive size literals in the signature.
    Static,
    /// Size literals of `0`; the real size is read from the value.
    Dynamic,
}

/// Selects one of the eight vector/matrix visualizers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContainerKind {
    pub shape: Shape,
    pub storage: Storage,
    pub sizing: Sizing,
}

impl ContainerKind {
    pub const fn new(shape: Shape, storage: Storage, sizing: Sizing) -> Self {
        Self {
            shape,
            storage,
            sizing,
        }
    }

    /// The class name without its size, e.g. `MatrixProxy`.
    pub const fn family(self) -> &'static str {
        match (self.shape, self.storage) {
            (Shape::Vector, Storage::Owning) => "Vector",
            (Shape::Vector, Storage::Proxy) => "VectorProxy",
            (Shape::Matrix, Storage::Owning) => "Matrix",
            (Shape::Matrix, Storage::Proxy) => "MatrixProxy",
        }
    }

    /// A readable name for the variant, e.g. `VectorProxyDynamic`.
    pub const fn name(self) -> &'static str {
        match (self.shape, self.storage, self.sizing) {
            (Shape::Vector, Storage::Owning, Sizing::Static) => "VectorStatic",
            (Shape::Vector, Storage::Owning, Sizing::Dynamic) => "VectorDynamic",
            (Shape::Vector, Storage::Proxy, Sizing::Static) => "VectorProxyStatic",
            (Shape::Vector, Storage::Proxy, Sizing::Dynamic) => "VectorProxyDynamic",
            (Shape::Matrix, Storage::Owning, Sizing::Static) => "MatrixStatic",
            (Shape::Matrix, Storage::Owning, Sizing::Dynamic) => "MatrixDynamic",
            (Shape::Matrix, Storage::Proxy, Sizing::Static) => "MatrixProxyStatic",
            (Shape::Matrix, Storage::Proxy, Sizing::Dynamic) => "MatrixProxyDynamic",
        }
    }

    fn data_path(self) -> &'static [&'static str] {
        match (self.storage, self.sizing) {
            (Storage::Proxy, _) => &["m_ptr"],
            (Storage::Owning, Sizing::Static) => &["core_", "elems"],
            (Storage::Owning, Sizing::Dynamic) => &["core_", "m_data", "px"],
        }
    }

    fn size_paths(self) -> &'static [&'static [&'static str]] {
        match (self.shape, self.storage) {
            (Shape::Vector, Storage::Owning) => &[&["core_", "m_size"]],
            (Shape::Vector, Storage::Proxy) => &[&["m_size"]],
            (Shape::Matrix, _) => &[&["m_rows"], &["m_cols"]],
        }
    }
}

/// A vector, matrix or proxy shown as a flat array of its elements.
#[derive(Clone, Debug)]
pub struct Container<V> {
    kind: ContainerKind,
    value: V,
    data: V,
    dims: [usize; 2],
    len: usize,
}

impl<V: OpaqueValue> Container<V> {
    /// Reads the size and element pointer of `value`.
    ///
    /// Static sizes come from template arguments 1 (and 2 for matrices) of the
    /// value's signature; dynamic sizes are read from the value itself.
    pub fn new(value: &V, kind: ContainerKind) -> Result<Self> {
        let dims = match kind.sizing {
            Sizing::Static => static_dims(value, kind.shape)?,
            Sizing::Dynamic => {
                let mut dims = [1; 2];
                for (dim, path) in dims.iter_mut().zip(kind.size_paths()) {
                    let size = value.get_path(*path)?.scalar()?;
                    *dim = size.as_usize().ok_or(Error::InvalidSize(size))?;
                }
                dims
            }
        };
        let len = dims[0]
            .checked_mul(dims[1])
            .ok_or(Error::ArithmeticOverflow)?;
        let data = value.get_path(kind.data_path())?;

        Ok(Self {
            kind,
            value: value.clone(),
            data,
            dims,
            len,
        })
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Total number of elements (`rows * cols` for matrices).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(rows, cols)`; vectors report one column.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.dims[0], self.dims[1])
    }

    /// Element `index` in storage order.
    pub fn element(&self, index: usize) -> Result<V> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        self.data.index(index)
    }

    pub(super) fn child(&self, position: usize) -> Option<(&'static str, Child<V>)> {
        (position < self.len).then(|| ("", self.data.index(position).into()))
    }
}

fn static_dims<V: OpaqueValue>(value: &V, shape: Shape) -> Result<[usize; 2]> {
    let signature = value.signature();
    let literal = |position: usize| {
        signature
            .int_argument(position)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| Error::NotAContainer(signature.to_string()))
    };
    Ok(match shape {
        Shape::Vector => [literal(1)?, 1],
        Shape::Matrix => [literal(1)?, literal(2)?],
    })
}

impl<V> fmt::Display for Container<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            f.write_str("(empty) ")?;
        }
        f.write_str(self.kind.family())?;
        // Static sizes print the element count, so `Matrix<T, 2, 3>` is `Matrix6`.
        match self.kind.sizing {
            Sizing::Static => write!(f, "{}", self.len),
            Sizing::Dynamic => f.write_str("X"),
        }
    }
}
