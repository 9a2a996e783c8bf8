//! Text parsing helpers shared by every collector.

#[macro_use]
pub mod macros;
pub mod common;
