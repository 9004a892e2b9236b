//! Use cases: text conversion and solution scans.

pub mod converter;
pub mod introspection;

pub use converter::{convert, ConvertOptions, Converter};
pub use introspection::Introspection;
