//! # extdeck-core
//!
//! Core library for extdeck providing:
//! - Extension records and install steps shared by every catalog source
//! - Derived presentation types (group headers, items, merged catalogs)
//! - Error types
//! - Hierarchical catalog configuration loading

pub mod config;
pub mod error;
pub mod types;

pub use config::{CatalogConfig, ConfigLoader};
pub use error::{Error, Result};
