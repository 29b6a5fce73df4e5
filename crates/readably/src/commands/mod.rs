//! Command implementations.

pub mod extract;
pub mod info;
pub mod level;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod simplify;
pub mod translate;
