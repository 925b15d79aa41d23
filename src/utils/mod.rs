//! Shared helpers: zlib payload handling and preimage readers.

pub mod compress;
pub mod reader;
