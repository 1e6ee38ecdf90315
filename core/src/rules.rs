//! Validation rules attached to request fields.
//!
//! Rules come from the host framework's request validation declarations,
//! either as a pipe-delimited string (`required|email`) or as a list of
//! tokens. A token may carry a parameter after its first `:`.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A single rule token such as `required` or `date_format:Y-m-d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule(String);

impl Rule {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// The raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The rule name, i.e. the token up to the first `:`.
    pub fn name(&self) -> &str {
        match self.0.split_once(':') {
            Some((name, _)) => name,
            None => &self.0,
        }
    }

    /// The parameter after the first `:`, if the token has one.
    pub fn parameter(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, param)| param)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Rule {
    fn from(s: &str) -> Self {
        Rule::new(s)
    }
}

/// The ordered rule tokens declared for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pipe-delimited rule string. Empty segments are dropped.
    pub fn parse(source: &str) -> Self {
        source
            .split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(Rule::new)
            .collect()
    }

    pub fn push(&mut self, rule: impl Into<Rule>) {
        self.rules.push(rule.into());
    }

    /// Returns true if a token equals `token` exactly.
    pub fn contains(&self, token: &str) -> bool {
        self.rules.iter().any(|r| r.as_str() == token)
    }

    /// First token whose text starts with `prefix`.
    pub fn find_prefixed(&self, prefix: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.as_str().starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl From<&str> for RuleSet {
    fn from(source: &str) -> Self {
        RuleSet::parse(source)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a pipe-delimited rule string or a list of rule tokens")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RuleSet, E> {
                Ok(RuleSet::parse(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<RuleSet, E> {
                Ok(RuleSet::new())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSet, A::Error> {
                let mut rules = RuleSet::new();
                while let Some(token) = seq.next_element::<String>()? {
                    // A list entry may itself be pipe-delimited.
                    for rule in RuleSet::parse(&token).rules {
                        rules.push(rule);
                    }
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_any(RuleSetVisitor)
    }
}

/// Field name to rule set, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRuleSet {
    fields: Vec<(String, RuleSet)>,
}

impl FieldRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rules of `field`. A replaced field keeps its
    /// original position.
    pub fn insert(&mut self, field: impl Into<String>, rules: impl Into<RuleSet>) {
        let field = field.into();
        let rules = rules.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = rules,
            None => self.fields.push((field, rules)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, R: Into<RuleSet>> FromIterator<(K, R)> for FieldRuleSet {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut set = FieldRuleSet::new();
        for (field, rules) in iter {
            set.insert(field, rules);
        }
        set
    }
}

impl<'de> Deserialize<'de> for FieldRuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldRuleSetVisitor;

        impl<'de> Visitor<'de> for FieldRuleSetVisitor {
            type Value = FieldRuleSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from field name to rules")
            }

            fn visit_unit<E: de::Error>(self) -> Result<FieldRuleSet, E> {
                Ok(FieldRuleSet::new())
            }

            // Visiting the map directly keeps document order.
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldRuleSet, A::Error> {
                let mut set = FieldRuleSet::new();
                while let Some((field, rules)) = map.next_entry::<String, RuleSet>()? {
                    set.insert(field, rules);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(FieldRuleSetVisitor)
    }
}
