//! Rule classification - maps a field to a semantic category
//!
//! Classification is a priority list, not a scoring classifier: the rows
//! of [`PRIORITY`] are tried in order and the first row whose predicate
//! holds decides the category. A field can satisfy several rows (for
//! example `company_name` with `string` matches both the company and the
//! person-name rows); only the earliest one counts.
//!
//! Name checks are case-sensitive substring tests with the field name as
//! the haystack, so `billing_city` is a city field.

use testsmith_core::RuleSet;

use crate::category::Category;

/// The rule token several name-based rows require.
const STRING_RULE: &str = "string";

/// The rule prefix carrying a PHP date pattern.
const DATE_FORMAT_RULE: &str = "date_format";

/// A test over a field name and its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The rule set contains this exact token.
    HasRule(&'static str),
    /// Some token in the rule set starts with this prefix.
    HasRulePrefix(&'static str),
    /// The field name contains any of these keywords.
    NameContains(&'static [&'static str]),
    /// The field name contains any of these keywords and the rules
    /// contain `string`.
    NamedString(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, field: &str, rules: &RuleSet) -> bool {
        match self {
            Predicate::HasRule(token) => rules.contains(token),
            Predicate::HasRulePrefix(prefix) => rules.find_prefixed(prefix).is_some(),
            Predicate::NameContains(keywords) => name_contains_any(field, keywords),
            Predicate::NamedString(keywords) => {
                name_contains_any(field, keywords) && rules.contains(STRING_RULE)
            }
        }
    }
}

fn name_contains_any(field: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| field.contains(keyword))
}

/// Classification rows in priority order.
///
/// The `DateWithFormat` row holds an empty pattern; [`classify`] fills in
/// the parameter of the matching rule.
pub static PRIORITY: [(Predicate, Category); 16] = [
    (Predicate::HasRule("email"), Category::Email),
    (Predicate::NamedString(&["company"]), Category::CompanyName),
    (Predicate::NamedString(&["address"]), Category::Address),
    (Predicate::NamedString(&["name"]), Category::PersonName),
    (Predicate::NamedString(&["street"]), Category::StreetName),
    (Predicate::NamedString(&["street_address"]), Category::StreetAddress),
    (Predicate::NamedString(&["city"]), Category::City),
    (Predicate::NamedString(&["state"]), Category::State),
    (Predicate::NamedString(&["country"]), Category::Country),
    (Predicate::NamedString(&["zip", "pin"]), Category::ZipCode),
    (Predicate::NameContains(&["latitude"]), Category::Latitude),
    (Predicate::NameContains(&["longitude"]), Category::Longitude),
    (Predicate::NameContains(&["phone", "mobile"]), Category::Phone),
    (Predicate::HasRule("boolean"), Category::Boolean),
    (Predicate::HasRule("date"), Category::Date),
    (
        Predicate::HasRulePrefix(DATE_FORMAT_RULE),
        Category::DateWithFormat(String::new()),
    ),
];

/// Classify a field by its name and rules. Total: falls back to
/// [`Category::Unknown`] when no row matches.
pub fn classify(field: &str, rules: &RuleSet) -> Category {
    let Some((_, category)) = PRIORITY
        .iter()
        .find(|(predicate, _)| predicate.matches(field, rules))
    else {
        return Category::Unknown;
    };

    match category {
        Category::DateWithFormat(_) => Category::DateWithFormat(date_format_of(rules)),
        other => other.clone(),
    }
}

/// The pattern after the first `:` of the `date_format` rule, or empty.
fn date_format_of(rules: &RuleSet) -> String {
    rules
        .find_prefixed(DATE_FORMAT_RULE)
        .and_then(|rule| rule.parameter())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rules(source: &str) -> RuleSet {
        RuleSet::parse(source)
    }

    #[test]
    fn test_email_needs_no_name() {
        assert_eq!(classify("contact", &rules("required|email")), Category::Email);
        assert_eq!(classify("company_email", &rules("email|string")), Category::Email);
    }

    #[test]
    fn test_named_string_rows() {
        let string = rules("required|string");
        assert_eq!(classify("company", &string), Category::CompanyName);
        assert_eq!(classify("address", &string), Category::Address);
        assert_eq!(classify("first_name", &string), Category::PersonName);
        assert_eq!(classify("street", &string), Category::StreetName);
        assert_eq!(classify("city", &string), Category::City);
        assert_eq!(classify("billing_city", &string), Category::City);
        assert_eq!(classify("state", &string), Category::State);
        assert_eq!(classify("country", &string), Category::Country);
        assert_eq!(classify("zip", &string), Category::ZipCode);
        assert_eq!(classify("pincode", &string), Category::ZipCode);
    }

    #[test]
    fn test_named_rows_need_string_rule() {
        let required = rules("required");
        assert_eq!(classify("company", &required), Category::Unknown);
        assert_eq!(classify("city", &required), Category::Unknown);
        assert_eq!(classify("zip", &rules("required|integer")), Category::Unknown);
    }

    #[test]
    fn test_earlier_rows_shadow_later_ones() {
        let string = rules("string");
        assert_eq!(classify("company_name", &string), Category::CompanyName);
        assert_eq!(classify("street_address", &string), Category::Address);
        assert_eq!(classify("street_name", &string), Category::PersonName);
        assert_eq!(classify("state_name", &string), Category::PersonName);
    }

    #[test]
    fn test_name_only_rows() {
        let none = RuleSet::new();
        assert_eq!(classify("latitude", &none), Category::Latitude);
        assert_eq!(classify("home_longitude", &none), Category::Longitude);
        assert_eq!(classify("phone", &none), Category::Phone);
        assert_eq!(classify("mobile_number", &rules("required|numeric")), Category::Phone);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        assert_eq!(classify("Phone", &RuleSet::new()), Category::Unknown);
        assert_eq!(classify("CITY", &rules("string")), Category::Unknown);
    }

    #[test]
    fn test_rule_rows() {
        assert_eq!(classify("active", &rules("required|boolean")), Category::Boolean);
        assert_eq!(classify("born_on", &rules("required|date")), Category::Date);
        assert_eq!(
            classify("event_date", &rules("required|date_format:Y-m-d")),
            Category::DateWithFormat("Y-m-d".to_string())
        );
    }

    #[test]
    fn test_date_format_parameter_keeps_colons() {
        assert_eq!(
            classify("starts_at", &rules("date_format:H:i:s")),
            Category::DateWithFormat("H:i:s".to_string())
        );
    }

    #[test]
    fn test_date_format_without_parameter_is_empty() {
        assert_eq!(
            classify("starts_at", &rules("date_format")),
            Category::DateWithFormat(String::new())
        );
    }

    #[test]
    fn test_date_beats_date_format() {
        assert_eq!(
            classify("when", &rules("date|date_format:Y")),
            Category::Date
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("notes", &rules("required|max:200")), Category::Unknown);
        assert_eq!(classify("", &RuleSet::new()), Category::Unknown);
    }

    const KEYWORDS: &[&str] = &[
        "company", "address", "name", "street", "city", "state", "country", "zip", "pin",
        "latitude", "longitude", "phone", "mobile", "x", "",
    ];

    const TOKENS: &[&str] = &[
        "required", "string", "email", "boolean", "date", "date_format:Y-m-d", "date_format",
        "integer", "max:255", "nullable",
    ];

    fn field_strategy() -> impl Strategy<Value = String> {
        (
            prop::sample::select(KEYWORDS),
            prop::sample::select(KEYWORDS),
            "[a-z_]{0,4}",
        )
            .prop_map(|(a, b, tail)| format!("{}_{}{}", a, b, tail))
    }

    fn rules_strategy() -> impl Strategy<Value = RuleSet> {
        prop::collection::vec(prop::sample::select(TOKENS), 0..5)
            .prop_map(|tokens| RuleSet::parse(&tokens.join("|")))
    }

    proptest! {
        #[test]
        fn prop_classification_matches_first_priority_row(
            field in field_strategy(),
            rules in rules_strategy(),
        ) {
            let category = classify(&field, &rules);
            let first = PRIORITY.iter().position(|(p, _)| p.matches(&field, &rules));
            match first {
                Some(index) => prop_assert_eq!(PRIORITY[index].1.as_str(), category.as_str()),
                None => prop_assert_eq!(category, Category::Unknown),
            }
        }

        #[test]
        fn prop_company_beats_person_name(prefix in "[a-z]{0,3}", rules in rules_strategy()) {
            let field = format!("{}company_name", prefix);
            let mut rules = rules;
            rules.push("string");
            let category = classify(&field, &rules);
            if rules.contains("email") {
                prop_assert_eq!(category, Category::Email);
            } else {
                prop_assert_eq!(category, Category::CompanyName);
            }
        }

        #[test]
        fn prop_email_rule_always_wins(field in "[a-z_]{0,12}", rules in rules_strategy()) {
            let mut rules = rules;
            rules.push("email");
            prop_assert_eq!(classify(&field, &rules), Category::Email);
        }
    }
}
