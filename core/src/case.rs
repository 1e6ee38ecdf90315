//! Generated cases: the success and failure payloads of a route.

use std::fmt;

use crate::FieldValue;

/// Which variant a case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
    /// Every field carries a synthesized, valid-shaped value.
    Success,
    /// Every field is blank, to trip required-field validation.
    Failure,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Success => "success",
            CaseKind::Failure => "failure",
        }
    }

    /// HTTP status the generated test asserts.
    pub fn expected_status(&self) -> u16 {
        match self {
            CaseKind::Success => 200,
            CaseKind::Failure => 400,
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to literal value, in field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub kind: CaseKind,
    values: Vec<(String, FieldValue)>,
}

impl Case {
    pub fn new(kind: CaseKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    /// Set the value of `field`, replacing an earlier value in place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The cases generated for one route, in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseSet {
    cases: Vec<Case>,
}

impl CaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case. A case of an existing kind replaces it in place.
    pub fn insert(&mut self, case: Case) {
        match self.cases.iter_mut().find(|c| c.kind == case.kind) {
            Some(existing) => *existing = case,
            None => self.cases.push(case),
        }
    }

    pub fn get(&self, kind: CaseKind) -> Option<&Case> {
        self.cases.iter().find(|c| c.kind == kind)
    }

    pub fn success(&self) -> Option<&Case> {
        self.get(CaseKind::Success)
    }

    pub fn failure(&self) -> Option<&Case> {
        self.get(CaseKind::Failure)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
