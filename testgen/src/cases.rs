//! Case building - the failure and success payloads of a route

use testsmith_core::{Case, CaseKind, CaseSet, FieldRuleSet, FieldValue};
use testsmith_synth::{FakeProvider, ValueSynthesizer};

/// Every field blank, to trip the target's required-field validation.
pub fn failure_case(fields: &FieldRuleSet) -> Case {
    let mut case = Case::new(CaseKind::Failure);
    for name in fields.field_names() {
        case.set(name, FieldValue::blank());
    }
    case
}

/// Every field populated with a value synthesized from its rules.
pub fn success_case<P: FakeProvider>(
    fields: &FieldRuleSet,
    synthesizer: &mut ValueSynthesizer<P>,
) -> Case {
    let mut case = Case::new(CaseKind::Success);
    for (name, rules) in fields.iter() {
        case.set(name, synthesizer.value_for(name, rules));
    }
    case
}

/// Both cases of a route. The failure case comes first; that order is the
/// order of the generated test functions.
pub fn build_cases<P: FakeProvider>(
    fields: &FieldRuleSet,
    synthesizer: &mut ValueSynthesizer<P>,
) -> CaseSet {
    let mut cases = CaseSet::new();
    cases.insert(failure_case(fields));
    cases.insert(success_case(fields, synthesizer));
    cases
}
