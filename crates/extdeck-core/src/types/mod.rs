//! Type definitions for extension records and the derived catalog view

mod catalog_types;
mod extension_types;

pub use catalog_types::*;
pub use extension_types::*;
