use std::collections::HashMap;

use crate::{Error, Modifier, Result, TypeSignature, parse};

use super::POINTER_SIZE;

/// Bases deeper than this are not searched; layout tables are acyclic in
/// practice but are built by hand.
const MAX_BASE_DEPTH: usize = 32;

/// Arithmetic types and how they are stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ScalarKind {
    pub const fn size(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::I8 | ScalarKind::U8 => 1,
            ScalarKind::I16 | ScalarKind::U16 => 2,
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => 4,
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => 8,
        }
    }

    /// The kind of a builtin C++ arithmetic type on an LP64 target.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => ScalarKind::Bool,
            "char" | "signed char" | "int8_t" => ScalarKind::I8,
            "unsigned char" | "uint8_t" => ScalarKind::U8,
            "short" | "short int" | "int16_t" => ScalarKind::I16,
            "unsigned short" | "unsigned short int" | "uint16_t" => ScalarKind::U16,
            "int" | "int32_t" => ScalarKind::I32,
            "unsigned" | "unsigned int" | "uint32_t" => ScalarKind::U32,
            "long" | "long int" | "long long" | "long long int" | "int64_t" | "ptrdiff_t"
            | "std::ptrdiff_t" => ScalarKind::I64,
            "unsigned long" | "unsigned long int" | "unsigned long long"
            | "unsigned long long int" | "uint64_t" | "size_t" | "std::size_t" => ScalarKind::U64,
            "float" => ScalarKind::F32,
            "double" => ScalarKind::F64,
            _ => return None,
        })
    }
}

/// A data member at a fixed offset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Field {
    pub name: String,
    pub offset: usize,
    pub ty: TypeSignature,
}

/// A base class subobject at a fixed offset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Base {
    pub ty: TypeSignature,
    pub offset: usize,
}

/// Size, members and bases of a class type.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StructLayout {
    size: usize,
    fields: Vec<Field>,
    bases: Vec<Base>,
}

impl StructLayout {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Adds member `name` of type `ty` at `offset`.
    pub fn field(mut self, name: &str, offset: usize, ty: &str) -> Result<Self> {
        self.fields.push(Field {
            name: name.to_owned(),
            offset,
            ty: parse(ty)?,
        });
        Ok(self)
    }

    /// Declares `ty` as a base class located at `offset`.
    pub fn base(mut self, ty: &str, offset: usize) -> Result<Self> {
        self.bases.push(Base {
            ty: parse(ty)?,
            offset,
        });
        Ok(self)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[inline]
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }
}

/// How a type is stored.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Layout {
    Scalar(ScalarKind),
    Struct(StructLayout),
}

impl Layout {
    pub fn size(&self) -> usize {
        match self {
            Layout::Scalar(kind) => kind.size(),
            Layout::Struct(layout) => layout.size(),
        }
    }
}

impl From<ScalarKind> for Layout {
    fn from(kind: ScalarKind) -> Self {
        Layout::Scalar(kind)
    }
}

impl From<StructLayout> for Layout {
    fn from(layout: StructLayout) -> Self {
        Layout::Struct(layout)
    }
}

/// Layouts of the types found in a [`MemoryImage`](super::MemoryImage).
///
/// Builtin arithmetic types are known without being inserted. Lookups ignore
/// `const`.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    layouts: HashMap<TypeSignature, Layout>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the layout of `ty`, replacing any earlier one.
    pub fn insert(&mut self, ty: &str, layout: impl Into<Layout>) -> Result<&mut Self> {
        self.layouts.insert(parse(ty)?.unqualified(), layout.into());
        Ok(self)
    }

    /// The layout of an object type.
    pub fn layout(&self, ty: &TypeSignature) -> Result<Layout> {
        if let Some(layout) = self.layouts.get(&ty.unqualified()) {
            return Ok(layout.clone());
        }
        ty.arguments()
            .is_empty()
            .then(|| ScalarKind::from_name(ty.name()))
            .flatten()
            .map(Layout::Scalar)
            .ok_or_else(|| Error::UnknownType(ty.to_string()))
    }

    /// The layout of `ty` if it is a class type.
    pub fn struct_layout(&self, ty: &TypeSignature) -> Option<&StructLayout> {
        match self.layouts.get(&ty.unqualified()) {
            Some(Layout::Struct(layout)) => Some(layout),
            _ => None,
        }
    }

    /// Size in bytes of any type, including pointers and arrays.
    pub fn size_of(&self, ty: &TypeSignature) -> Result<usize> {
        match ty.pointee() {
            Some((Modifier::Pointer | Modifier::Reference, _)) => Ok(POINTER_SIZE),
            Some((Modifier::Array(len), element)) => self
                .size_of(&element)?
                .checked_mul(len)
                .ok_or(Error::ArithmeticOverflow),
            Some((Modifier::Const, _)) | None => Ok(self.layout(ty)?.size()),
        }
    }

    /// Offset and type of member `name` of `ty`, searching base classes too.
    pub fn find_field(&self, ty: &TypeSignature, name: &str) -> Option<(usize, TypeSignature)> {
        self.find_field_in(ty, name, 0)
    }

    fn find_field_in(
        &self,
        ty: &TypeSignature,
        name: &str,
        depth: usize,
    ) -> Option<(usize, TypeSignature)> {
        if depth > MAX_BASE_DEPTH {
            return None;
        }
        let layout = self.struct_layout(ty)?;
        if let Some(field) = layout.fields.iter().find(|f| f.name == name) {
            return Some((field.offset, field.ty.clone()));
        }
        layout.bases.iter().find_map(|base| {
            self.find_field_in(&base.ty, name, depth + 1)
                .and_then(|(offset, ty)| Some((base.offset.checked_add(offset)?, ty)))
        })
    }

    /// Offset of the `base` subobject within `derived`, if `base` is
    /// `derived` itself or one of its (transitive) bases.
    pub fn base_offset(&self, derived: &TypeSignature, base: &TypeSignature) -> Option<usize> {
        self.base_offset_in(&derived.unqualified(), &base.unqualified(), 0)
    }

    fn base_offset_in(
        &self,
        derived: &TypeSignature,
        base: &TypeSignature,
        depth: usize,
    ) -> Option<usize> {
        if derived == base {
            return Some(0);
        }
        if depth > MAX_BASE_DEPTH {
            return None;
        }
        self.struct_layout(derived)?.bases.iter().find_map(|b| {
            self.base_offset_in(&b.ty.unqualified(), base, depth + 1)
                .and_then(|offset| b.offset.checked_add(offset))
        })
    }
}
