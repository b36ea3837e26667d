//! CLI command implementations.

pub mod common;
pub mod coupling_map;
pub mod inspect;
pub mod version;
