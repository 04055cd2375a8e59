//! Configuration types
//!
//! Board-agnostic cycle configuration, loadable from TOML text.

pub mod cycle;

pub use cycle::*;
