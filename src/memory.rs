//! An [`OpaqueValue`](crate::OpaqueValue) over a snapshot of process memory.
//!
//! A host that can copy bytes out of the inspected process and knows the
//! layouts of the types involved can use [`MemoryImage`] directly instead of
//! implementing the accessor trait itself. All reads are bounds checked, so a
//! dangling pointer becomes [`Error::InvalidAddress`](crate::Error::InvalidAddress)
//! rather than a crash.
//!
//! # Example
//!
//! ```
//! use vw_pretty::memory::{MemoryImage, StructLayout, TypeTable};
//! use vw_pretty::{LittleEndian, OpaqueValue, Scalar};
//!
//! let mut types = TypeTable::new();
//! types
//!     .insert(
//!         "Point",
//!         StructLayout::new(16).field("x", 0, "double")?.field("y", 8, "double")?,
//!     )?;
//!
//! let mut bytes = Vec::new();
//! bytes.extend_from_slice(&1.5f64.to_le_bytes());
//! bytes.extend_from_slice(&2.5f64.to_le_bytes());
//! let image = MemoryImage::<LittleEndian>::new(0x1000, bytes, types);
//!
//! let point = image.value("Point", 0x1000)?;
//! assert_eq!(point.field("y")?.scalar()?, Scalar::Float(2.5));
//! # Ok::<(), vw_pretty::Error>(())
//! ```

mod image;
mod layout;

pub use image::{MemoryImage, MemoryValue};
pub use layout::{Base, Field, Layout, ScalarKind, StructLayout, TypeTable};

/// Byte order of an inspected process: [`BigEndian`](crate::BigEndian),
/// [`LittleEndian`](crate::LittleEndian) or [`NativeEndian`](crate::NativeEndian).
pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Width of a pointer in inspected memory.
pub(crate) const POINTER_SIZE: usize = 8;
