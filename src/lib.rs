/*!
restprobe is a property-path query and assertion engine for REST-style API
responses, driven from behavior-driven test scenarios.
*/

pub mod assert;
mod config;
mod context;
mod deserialization;
mod error;
mod ingest;
mod property_path;
mod value;

pub use config::*;
pub use context::*;
pub use error::*;
pub use ingest::*;
pub use property_path::*;
pub use value::*;

pub use assert::CountCmp;

#[cfg(test)]
mod tests;
