//! Collectors for Linux `/proc` filesystem.
//!
//! This module provides parsers and a collector for reading CPU, memory and
//! network counters from the `/proc` virtual filesystem.

pub mod parser;
pub mod system;

pub use parser::ParseError;
pub use system::{CollectError, SystemCollector};
