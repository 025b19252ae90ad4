pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

mod config;
mod error;
pub mod memory;
pub mod registry;
pub mod render;
mod signature;
mod step;
mod value;
mod visualizer;

pub use config::*;
pub use error::*;
pub use memory::ByteOrder;
pub use registry::{
    ArgPattern, ArgsPattern, Builder, NamePattern, Registry, Rule, SignaturePattern, global,
    init_global,
};
pub use signature::*;
pub use step::Step;
pub use value::*;
pub use visualizer::*;
