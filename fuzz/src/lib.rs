use bytes::Bytes;
use vw_pretty::memory::{MemoryImage, StructLayout, TypeTable};
use vw_pretty::render::render;
use vw_pretty::{BigEndian, ByteOrder, Config, LittleEndian, Registry, parse};

const BASE: u64 = 0x1000;

const ROOTS: &[&str] = &[
    "vw::math::Vector<double, 0>",
    "vw::math::VectorProxy<double, 0>",
    "vw::math::Matrix<double, 0, 0>",
    "vw::math::MatrixProxy<float, 0, 0>",
    "vw::math::VectorBase<vw::math::Vector<double, 0> >",
    "vw::math::BBox<double, 0>",
];

fn types() -> Option<TypeTable> {
    let mut types = TypeTable::new();
    types
        .insert(
            "boost::shared_array<double>",
            StructLayout::new(16).field("px", 0, "double*").ok()?,
        )
        .ok()?
        .insert(
            "vw::math::VectorCore<double>",
            StructLayout::new(24)
                .field("m_size", 0, "unsigned long")
                .ok()?
                .field("m_data", 8, "boost::shared_array<double>")
                .ok()?,
        )
        .ok()?
        .insert(
            "vw::math::VectorBase<vw::math::Vector<double, 0> >",
            StructLayout::new(1),
        )
        .ok()?
        .insert(
            "vw::math::Vector<double, 0>",
            StructLayout::new(24)
                .base("vw::math::VectorBase<vw::math::Vector<double, 0> >", 0)
                .ok()?
                .field("core_", 0, "vw::math::VectorCore<double>")
                .ok()?,
        )
        .ok()?
        .insert(
            "vw::math::VectorProxy<double, 0>",
            StructLayout::new(16)
                .field("m_ptr", 0, "double*")
                .ok()?
                .field("m_size", 8, "long")
                .ok()?,
        )
        .ok()?
        .insert(
            "vw::math::Matrix<double, 0, 0>",
            StructLayout::new(32)
                .field("m_rows", 0, "unsigned long")
                .ok()?
                .field("m_cols", 8, "unsigned long")
                .ok()?
                .field("core_", 16, "vw::math::VectorCore<double>")
                .ok()?,
        )
        .ok()?
        .insert(
            "vw::math::MatrixProxy<float, 0, 0>",
            StructLayout::new(24)
                .field("m_ptr", 0, "float*")
                .ok()?
                .field("m_rows", 8, "int")
                .ok()?
                .field("m_cols", 16, "int")
                .ok()?,
        )
        .ok()?
        .insert(
            "vw::math::BBox<double, 0>",
            StructLayout::new(48)
                .field("m_min", 0, "vw::math::Vector<double, 0>")
                .ok()?
                .field("m_max", 24, "vw::math::Vector<double, 0>")
                .ok()?,
        )
        .ok()?;
    Some(types)
}

/// Signatures must either fail to parse or print back to an equal signature.
pub fn test_parse(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(sig) = parse(text) {
        let reparsed = parse(&sig.to_string()).expect("canonical form must parse");
        assert_eq!(sig, reparsed);
        let _ = Registry::default().matching_rule(&sig);
    }
}

/// Arbitrary bytes interpreted as `vw::math` values must never panic or
/// recurse without bound.
pub fn test_render<O: ByteOrder>(data: &[u8]) {
    let Some(types) = types() else {
        return;
    };
    let image = MemoryImage::<O>::new(BASE, Bytes::copy_from_slice(data), types);
    let registry = Registry::builtin(Config {
        max_elements: Some(256),
        ..Config::default()
    });
    for root in ROOTS {
        if let Ok(value) = image.value(root, BASE) {
            let _ = render(&registry, &value);
        }
    }
}

pub fn test(data: &[u8]) {
    test_parse(data);
    test_render::<LittleEndian>(data);
    test_render::<BigEndian>(data);
}
