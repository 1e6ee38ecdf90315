//! Literal values carried by generated cases.
//!
//! A request payload is flat: every field maps to a string literal. Numbers
//! and flags are carried in their textual form, the way a form post sends
//! them. Blank text is what a failure case sends.

use std::fmt;

/// A literal value for one request field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldValue(String);

impl FieldValue {
    /// The blank value sent by failure cases.
    pub fn blank() -> Self {
        FieldValue(String::new())
    }

    /// Returns true if this is the empty string.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Displays the raw value, without quoting.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue(s.to_string())
    }
}

/// `"1"` or `"0"`.
impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue(if b { "1" } else { "0" }.to_string())
    }
}

/// The shortest decimal form that reads back as the same float.
impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue(f.to_string())
    }
}
