//! Municipality inputs and loaders

mod data;
pub mod loader;

pub use data::{Entity, default_name};
pub use loader::{load_municipalities, load_municipalities_from_reader};
