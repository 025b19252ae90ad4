//! Hand-built memory images of `vw::math` values, laid out as a 64-bit
//! little-endian build would store them.

#![allow(dead_code)]

use vw_pretty::memory::{MemoryImage, MemoryValue, StructLayout, TypeTable};
use vw_pretty::{Child, LittleEndian, OpaqueValue, Visualizer};

pub const BASE: u64 = 0x1000;
pub const IMAGE_LEN: usize = 0x400;

pub const VECTOR2: &str = "vw::math::Vector<double, 2>";
pub const VECTOR3: &str = "vw::math::Vector<double, 3>";
pub const VECTORX: &str = "vw::math::Vector<double, 0>";
pub const VECTOR_PROXY3: &str = "vw::math::VectorProxy<double, 3>";
pub const VECTOR_PROXYX: &str = "vw::math::VectorProxy<double, 0>";
pub const MATRIX23: &str = "vw::math::Matrix<double, 2, 3>";
pub const MATRIXX: &str = "vw::math::Matrix<double, 0, 0>";
pub const MATRIX_PROXY22: &str = "vw::math::MatrixProxy<double, 2, 2>";
pub const MATRIX_PROXYX: &str = "vw::math::MatrixProxy<double, 0, 0>";
pub const VECTOR3_BASE: &str = "vw::math::VectorBase<vw::math::Vector<double, 3> >";
pub const UNARY: &str =
    "vw::math::VectorUnaryFunc<vw::math::Vector<double, 3>, vw::math::ArgNegationFunctor>";
pub const BINARY: &str = "vw::math::VectorBinaryFunc<vw::math::Vector<double, 3>, \
                          vw::math::Vector<double, 3>, vw::math::ArgArgSumFunctor>";

/// Layouts of every type the tests put into an image.
pub fn vw_types() -> TypeTable {
    let mut types = TypeTable::new();

    for n in [2usize, 3, 6] {
        types
            .insert(
                &format!("boost::array<double, {n}>"),
                StructLayout::new(8 * n)
                    .field("elems", 0, &format!("double [{n}]"))
                    .unwrap(),
            )
            .unwrap();
    }
    types
        .insert(
            "boost::array<int, 2>",
            StructLayout::new(8).field("elems", 0, "int [2]").unwrap(),
        )
        .unwrap()
        .insert(
            "boost::shared_array<double>",
            StructLayout::new(16).field("px", 0, "double*").unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::VectorCore<double>",
            StructLayout::new(24)
                .field("m_size", 0, "unsigned long")
                .unwrap()
                .field("m_data", 8, "boost::shared_array<double>")
                .unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::MatrixCore<double>",
            StructLayout::new(16)
                .field("m_data", 0, "boost::shared_array<double>")
                .unwrap(),
        )
        .unwrap();

    // Owning vectors, each deriving from its CRTP base.
    for (ty, size, core) in [
        (VECTOR2, 16, "boost::array<double, 2>"),
        (VECTOR3, 24, "boost::array<double, 3>"),
        ("vw::math::Vector<int, 2>", 8, "boost::array<int, 2>"),
        (VECTORX, 24, "vw::math::VectorCore<double>"),
    ] {
        let base = format!("vw::math::VectorBase<{ty} >");
        types.insert(&base, StructLayout::new(1)).unwrap();
        types
            .insert(
                ty,
                StructLayout::new(size)
                    .base(&base, 0)
                    .unwrap()
                    .field("core_", 0, core)
                    .unwrap(),
            )
            .unwrap();
    }

    types
        .insert(
            "vw::math::MatrixBase<vw::math::Matrix<double, 2, 3> >",
            StructLayout::new(1),
        )
        .unwrap()
        .insert(
            MATRIX23,
            StructLayout::new(48)
                .base("vw::math::MatrixBase<vw::math::Matrix<double, 2, 3> >", 0)
                .unwrap()
                .field("core_", 0, "boost::array<double, 6>")
                .unwrap(),
        )
        .unwrap()
        .insert(
            MATRIXX,
            StructLayout::new(32)
                .field("m_rows", 0, "unsigned long")
                .unwrap()
                .field("m_cols", 8, "unsigned long")
                .unwrap()
                .field("core_", 16, "vw::math::MatrixCore<double>")
                .unwrap(),
        )
        .unwrap()
        .insert(
            VECTOR_PROXY3,
            StructLayout::new(8).field("m_ptr", 0, "double*").unwrap(),
        )
        .unwrap()
        .insert(
            VECTOR_PROXYX,
            StructLayout::new(16)
                .field("m_ptr", 0, "double*")
                .unwrap()
                .field("m_size", 8, "unsigned long")
                .unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::VectorProxy<float, 0>",
            StructLayout::new(16)
                .field("m_ptr", 0, "float*")
                .unwrap()
                .field("m_size", 8, "int")
                .unwrap(),
        )
        .unwrap()
        .insert(
            MATRIX_PROXY22,
            StructLayout::new(8).field("m_ptr", 0, "double*").unwrap(),
        )
        .unwrap()
        .insert(
            MATRIX_PROXYX,
            StructLayout::new(24)
                .field("m_ptr", 0, "double*")
                .unwrap()
                .field("m_rows", 8, "unsigned long")
                .unwrap()
                .field("m_cols", 16, "unsigned long")
                .unwrap(),
        )
        .unwrap();

    // Bounding boxes.
    types
        .insert(
            "vw::math::BBox<double, 2>",
            StructLayout::new(32)
                .field("m_min", 0, VECTOR2)
                .unwrap()
                .field("m_max", 16, VECTOR2)
                .unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::BBox<int, 2>",
            StructLayout::new(16)
                .field("m_min", 0, "vw::math::Vector<int, 2>")
                .unwrap()
                .field("m_max", 8, "vw::math::Vector<int, 2>")
                .unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::BBox<double, 0>",
            StructLayout::new(48)
                .field("m_min", 0, VECTORX)
                .unwrap()
                .field("m_max", 24, VECTORX)
                .unwrap(),
        )
        .unwrap()
        .insert(
            "vw::math::BBox<float, 1>",
            StructLayout::new(8)
                .field("m_min", 0, "float")
                .unwrap()
                .field("m_max", 4, "float")
                .unwrap(),
        )
        .unwrap();

    // Expression nodes hold their operands by reference.
    types
        .insert("vw::math::ArgNegationFunctor", StructLayout::new(1))
        .unwrap()
        .insert("vw::math::ArgArgSumFunctor", StructLayout::new(1))
        .unwrap()
        .insert(
            UNARY,
            StructLayout::new(16)
                .field("v", 0, "vw::math::Vector<double, 3> const&")
                .unwrap()
                .field("func", 8, "vw::math::ArgNegationFunctor")
                .unwrap(),
        )
        .unwrap()
        .insert(
            BINARY,
            StructLayout::new(24)
                .field("v1", 0, "vw::math::Vector<double, 3> const&")
                .unwrap()
                .field("v2", 8, "vw::math::Vector<double, 3> const&")
                .unwrap()
                .field("func", 16, "vw::math::ArgArgSumFunctor")
                .unwrap(),
        )
        .unwrap();

    types
}

/// Bytes of an image under construction, starting at [`BASE`].
pub struct ImageBuilder {
    bytes: Vec<u8>,
    types: TypeTable,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; IMAGE_LEN],
            types: vw_types(),
        }
    }

    pub fn types(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    fn write(&mut self, address: u64, data: &[u8]) -> &mut Self {
        let start = (address - BASE) as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self
    }

    pub fn f64s(&mut self, address: u64, values: &[f64]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            self.write(address + 8 * i as u64, &value.to_le_bytes());
        }
        self
    }

    pub fn i32s(&mut self, address: u64, values: &[i32]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            self.write(address + 4 * i as u64, &value.to_le_bytes());
        }
        self
    }

    /// Writes an `unsigned long` or a pointer.
    pub fn u64(&mut self, address: u64, value: u64) -> &mut Self {
        self.write(address, &value.to_le_bytes())
    }

    pub fn build(&mut self) -> MemoryImage<LittleEndian> {
        MemoryImage::new(
            BASE,
            std::mem::take(&mut self.bytes),
            std::mem::take(&mut self.types),
        )
    }
}

/// The elements of a vector or matrix visualizer, read as `f64`.
pub fn elements<V: OpaqueValue>(visualizer: &Visualizer<V>) -> Vec<f64> {
    visualizer
        .children()
        .map(|(label, child)| {
            assert_eq!(label, "");
            child.value().unwrap().scalar().unwrap().as_f64()
        })
        .collect()
}

/// The labels of every child, in order.
pub fn labels<V: OpaqueValue>(visualizer: &Visualizer<V>) -> Vec<&'static str> {
    visualizer.children().map(|(label, _)| label).collect()
}

pub fn child<'m>(
    visualizer: &Visualizer<MemoryValue<'m, LittleEndian>>,
    label: &str,
) -> Child<MemoryValue<'m, LittleEndian>> {
    visualizer
        .children()
        .find(|(l, _)| *l == label)
        .map(|(_, child)| child)
        .unwrap()
}
