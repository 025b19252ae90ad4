use std::{fmt, marker::PhantomData};

use bytes::Bytes;
use zerocopy::{FromBytes, byteorder};

use crate::{Error, Modifier, OpaqueValue, Result, Scalar, TypeSignature, parse};

use super::{ByteOrder, Layout, POINTER_SIZE, ScalarKind, TypeTable};

/// A snapshot of inspected memory: a contiguous byte range starting at
/// `base`, plus the layouts of the types stored in it.
///
/// `O` is the byte order of the inspected process.
pub struct MemoryImage<O: ByteOrder> {
    base: u64,
    bytes: Bytes,
    types: TypeTable,
    _marker: PhantomData<O>,
}

impl<O: ByteOrder> MemoryImage<O> {
    pub fn new(base: u64, bytes: impl Into<Bytes>, types: TypeTable) -> Self {
        Self {
            base,
            bytes: bytes.into(),
            types,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    #[inline]
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// The `len` bytes at `address`, if all of them are inside the image.
    pub fn read(&self, address: u64, len: usize) -> Result<&[u8]> {
        let range = address
            .checked_sub(self.base)
            .and_then(|start| usize::try_from(start).ok())
            .and_then(|start| Some(start..start.checked_add(len)?))
            .filter(|range| range.end <= self.bytes.len());
        match range {
            Some(range) => Ok(&self.bytes[range]),
            None => Err(unreadable(address, len)),
        }
    }

    /// A pointer stored at `address`.
    pub fn read_pointer(&self, address: u64) -> Result<u64> {
        let bytes = self.read(address, POINTER_SIZE)?;
        decode::<byteorder::U64<O>>(bytes)
            .map(|p| p.get())
            .ok_or_else(|| unreadable(address, POINTER_SIZE))
    }

    /// The value of type `signature` stored at `address`.
    ///
    /// No memory is read until an accessor is called on the result.
    pub fn value(&self, signature: &str, address: u64) -> Result<MemoryValue<'_, O>> {
        Ok(self.value_of(parse(signature)?, address))
    }

    pub fn value_of(&self, ty: TypeSignature, address: u64) -> MemoryValue<'_, O> {
        MemoryValue {
            image: self,
            ty,
            address,
        }
    }

    fn read_scalar(&self, kind: ScalarKind, address: u64) -> Result<Scalar> {
        let bytes = self.read(address, kind.size())?;
        let scalar = match kind {
            ScalarKind::Bool => Some(Scalar::Bool(bytes[0] != 0)),
            ScalarKind::I8 => Some(Scalar::Int(i64::from(bytes[0] as i8))),
            ScalarKind::U8 => Some(Scalar::UInt(u64::from(bytes[0]))),
            ScalarKind::I16 => decode::<byteorder::I16<O>>(bytes).map(|v| Scalar::Int(v.get().into())),
            ScalarKind::U16 => decode::<byteorder::U16<O>>(bytes).map(|v| Scalar::UInt(v.get().into())),
            ScalarKind::I32 => decode::<byteorder::I32<O>>(bytes).map(|v| Scalar::Int(v.get().into())),
            ScalarKind::U32 => decode::<byteorder::U32<O>>(bytes).map(|v| Scalar::UInt(v.get().into())),
            ScalarKind::I64 => decode::<byteorder::I64<O>>(bytes).map(|v| Scalar::Int(v.get())),
            ScalarKind::U64 => decode::<byteorder::U64<O>>(bytes).map(|v| Scalar::UInt(v.get())),
            ScalarKind::F32 => {
                decode::<byteorder::F32<O>>(bytes).map(|v| Scalar::Float(v.get().into()))
            }
            ScalarKind::F64 => decode::<byteorder::F64<O>>(bytes).map(|v| Scalar::Float(v.get())),
        };
        scalar.ok_or_else(|| unreadable(address, kind.size()))
    }
}

#[cold]
fn unreadable(address: u64, len: usize) -> Error {
    Error::InvalidAddress { address, len }
}

#[inline]
fn decode<T: FromBytes>(bytes: &[u8]) -> Option<T> {
    T::read_from_bytes(bytes).ok()
}

impl<O: ByteOrder> fmt::Debug for MemoryImage<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryImage")
            .field("base", &format_args!("{:#x}", self.base))
            .field("len", &self.bytes.len())
            .field("types", &self.types)
            .finish()
    }
}

/// A typed location inside a [`MemoryImage`].
pub struct MemoryValue<'m, O: ByteOrder> {
    image: &'m MemoryImage<O>,
    ty: TypeSignature,
    address: u64,
}

impl<O: ByteOrder> Clone for MemoryValue<'_, O> {
    fn clone(&self) -> Self {
        Self {
            image: self.image,
            ty: self.ty.clone(),
            address: self.address,
        }
    }
}

impl<O: ByteOrder> fmt::Debug for MemoryValue<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) @ {:#x}", self.ty, self.address)
    }
}

impl<'m, O: ByteOrder> MemoryValue<'m, O> {
    #[inline]
    pub fn address(&self) -> u64 {
        self.address
    }

    fn at(&self, ty: TypeSignature, address: u64) -> Self {
        self.image.value_of(ty, address)
    }

    /// Follows a reference to its object; other values are returned as is.
    fn referent(&self) -> Result<Self> {
        match self.ty.pointee() {
            Some((Modifier::Reference, ty)) => {
                Ok(self.at(ty, self.image.read_pointer(self.address)?))
            }
            _ => Ok(self.clone()),
        }
    }

    fn offset(&self, offset: u64) -> Result<u64> {
        self.address
            .checked_add(offset)
            .ok_or_else(|| unreadable(self.address, usize::MAX))
    }
}

impl<O: ByteOrder> OpaqueValue for MemoryValue<'_, O> {
    #[inline]
    fn signature(&self) -> &TypeSignature {
        &self.ty
    }

    fn field(&self, name: &str) -> Result<Self> {
        let object = self.referent()?;
        if !object.ty.is_object() {
            return Err(Error::MissingField {
                ty: object.ty.to_string(),
                field: name.to_owned(),
            });
        }
        let (offset, ty) = self
            .image
            .types
            .find_field(&object.ty, name)
            .ok_or_else(|| Error::MissingField {
                ty: object.ty.to_string(),
                field: name.to_owned(),
            })?;
        Ok(object.at(ty, object.offset(offset as u64)?))
    }

    fn index(&self, index: usize) -> Result<Self> {
        let object = self.referent()?;
        let (start, element) = match object.ty.pointee() {
            Some((Modifier::Pointer, element)) => {
                (self.image.read_pointer(object.address)?, element)
            }
            Some((Modifier::Array(len), element)) => {
                if index >= len {
                    return Err(Error::IndexOutOfBounds { index, len });
                }
                (object.address, element)
            }
            _ => return Err(Error::NotIndexable(object.ty.to_string())),
        };
        let stride = self.image.types.size_of(&element)?;
        let address = index
            .checked_mul(stride)
            .and_then(|offset| start.checked_add(offset as u64))
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(self.at(element, address))
    }

    fn cast(&self, target: &TypeSignature) -> Result<Self> {
        let object = self.referent()?;
        let invalid = || Error::InvalidCast {
            from: self.ty.to_string(),
            to: target.to_string(),
        };
        if !object.ty.is_object() || !target.is_object() {
            return Err(invalid());
        }

        let types = &self.image.types;
        let address = if let Some(offset) = types.base_offset(&object.ty, target) {
            object.offset(offset as u64)?
        } else if let Some(offset) = types.base_offset(target, &object.ty) {
            object
                .address
                .checked_sub(offset as u64)
                .ok_or_else(invalid)?
        } else {
            return Err(invalid());
        };
        Ok(object.at(target.clone(), address))
    }

    fn scalar(&self) -> Result<Scalar> {
        let object = self.referent()?;
        match object.ty.pointee() {
            Some((Modifier::Pointer, _)) => {
                return self.image.read_pointer(object.address).map(Scalar::UInt);
            }
            Some(_) => return Err(Error::NotScalar(object.ty.to_string())),
            None => {}
        }
        match self.image.types.layout(&object.ty)? {
            Layout::Scalar(kind) => self.image.read_scalar(kind, object.address),
            Layout::Struct(_) => Err(Error::NotScalar(object.ty.to_string())),
        }
    }
}
