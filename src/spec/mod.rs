//! OpenAPI document loading and per-operation metadata.

pub mod build;
pub mod load;
pub mod types;

pub use build::build_operations;
pub use load::{load_spec, load_spec_from_value};
pub use types::{GenOverrides, OperationMeta, ResponseSpec, RouteInfo};
