//! testsmith value synthesis
//!
//! Decides what fake value a request field should carry:
//! - `classify`: ordered heuristics over the field name and its rules
//! - `synthesize`: category to value through a [`FakeProvider`]
//! - `php_date`: PHP `date()` patterns for `date_format` rules

pub mod category;
pub mod classify;
pub mod php_date;
pub mod provider;
pub mod synthesize;

pub use category::Category;
pub use classify::{classify, Predicate, PRIORITY};
pub use php_date::format_php_date;
pub use provider::{FakeProvider, FakerProvider};
pub use synthesize::{synthesize, ValueSynthesizer};
