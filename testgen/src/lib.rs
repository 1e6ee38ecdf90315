//! Feature-test generation for web application routes
//!
//! This crate turns route metadata into PHP feature tests:
//! - Builds a failure and a success case per route from its validation rules
//! - Collects the cases per controller and renders test functions
//! - Splices the functions into a test class template
//! - Writes one test class per controller

pub mod cases;
pub mod config;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod template;

pub use cases::{build_cases, failure_case, success_case};
pub use config::GeneratorConfig;
pub use error::{GenerateError, GenerateResult};
pub use formatter::{ControllerCases, FunctionRecord, RenderedFile, TestFormatter};
pub use generator::{GenerationReport, TestGenerator};
pub use template::Template;
