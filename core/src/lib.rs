//! testsmith core types
//!
//! This crate provides the data model shared by the synthesizer and the
//! test generator:
//! - Route descriptors and controller action parsing
//! - Validation rule tokens and per-field rule sets
//! - Field values, cases and case sets
//! - The JSON route manifest fed by the host framework

mod case;
mod error;
mod manifest;
mod route;
mod rules;
mod value;

pub use case::*;
pub use error::*;
pub use manifest::*;
pub use route::*;
pub use rules::*;
pub use value::*;
