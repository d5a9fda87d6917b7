//! Common test utilities for extdeck-catalog
//!
//! This module provides shared test infrastructure including:
//! - Record builders and language helpers
//! - A scripted extension manager and controllable snapshot sources
//! - A recording catalog view

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
