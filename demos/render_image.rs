//! Example: rendering `vw::math` values out of a memory snapshot
//!
//! Builds a small little-endian image holding a bounding box and a CRTP base,
//! resolves each value and prints the expanded tree as JSON.
//!
//! Run with: RUST_LOG=vw_pretty=debug cargo run --example render_image

use tracing_subscriber::EnvFilter;
use vw_pretty::memory::{MemoryImage, StructLayout, TypeTable};
use vw_pretty::render::render;
use vw_pretty::{LittleEndian, OpaqueValue, Registry};

const BASE: u64 = 0x1000;

fn types() -> vw_pretty::Result<TypeTable> {
    let mut types = TypeTable::new();
    types
        .insert(
            "boost::array<double, 2>",
            StructLayout::new(16).field("elems", 0, "double [2]")?,
        )?
        .insert(
            "vw::math::VectorBase<vw::math::Vector<double, 2> >",
            StructLayout::new(1),
        )?
        .insert(
            "vw::math::Vector<double, 2>",
            StructLayout::new(16)
                .base("vw::math::VectorBase<vw::math::Vector<double, 2> >", 0)?
                .field("core_", 0, "boost::array<double, 2>")?,
        )?
        .insert(
            "vw::math::BBox<double, 2>",
            StructLayout::new(32)
                .field("m_min", 0, "vw::math::Vector<double, 2>")?
                .field("m_max", 16, "vw::math::Vector<double, 2>")?,
        )?;
    Ok(types)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bytes = Vec::new();
    for x in [-1.5f64, 2.0, 3.5, 8.0] {
        bytes.extend_from_slice(&x.to_le_bytes());
    }
    let image = MemoryImage::<LittleEndian>::new(BASE, bytes, types()?);
    let registry = Registry::default();

    for (ty, address) in [
        ("vw::math::BBox<double, 2>", BASE),
        ("vw::math::VectorBase<vw::math::Vector<double, 2> >", BASE + 16),
    ] {
        let value = image.value(ty, address)?;
        match registry.resolve(&value) {
            Some(visualizer) => println!("{} = {visualizer}", value.signature()),
            None => println!("{} has no visualizer", value.signature()),
        }
        let tree = render(&registry, &value);
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }
    Ok(())
}
