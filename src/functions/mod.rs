pub mod primitives;
pub mod registry;
pub mod traits;

pub use registry::FunctionRegistry;
pub use traits::Primitive;
