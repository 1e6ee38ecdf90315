//! Value synthesis - turns a category into a fake field value

use testsmith_core::{FieldValue, RuleSet};

use crate::category::Category;
use crate::classify::classify;
use crate::provider::{FakeProvider, FakerProvider};

/// Produce a fresh value for `category`. Unknown fields get a blank value.
pub fn synthesize<P: FakeProvider + ?Sized>(category: &Category, provider: &mut P) -> FieldValue {
    match category {
        Category::Email => provider.email().into(),
        Category::CompanyName => provider.company().into(),
        Category::Address => provider.address().into(),
        Category::PersonName => provider.name().into(),
        Category::StreetName => provider.street_name().into(),
        Category::StreetAddress => provider.street_address().into(),
        Category::City => provider.city().into(),
        Category::State => provider.state().into(),
        Category::Country => provider.country().into(),
        Category::ZipCode => provider.postcode().into(),
        Category::Latitude => provider.latitude().into(),
        Category::Longitude => provider.longitude().into(),
        Category::Phone => provider.e164_phone_number().into(),
        Category::Boolean => provider.boolean().into(),
        Category::Date => provider.date().into(),
        Category::DateWithFormat(pattern) => provider.date_with_format(pattern).into(),
        Category::Unknown => FieldValue::blank(),
    }
}

/// Classifies fields and synthesizes values with an owned provider.
pub struct ValueSynthesizer<P: FakeProvider = FakerProvider> {
    provider: P,
}

impl ValueSynthesizer<FakerProvider> {
    /// A synthesizer over the `fake` crate, seeded when `seed` is given.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let provider = match seed {
            Some(seed) => FakerProvider::seeded(seed),
            None => FakerProvider::from_entropy(),
        };
        Self::new(provider)
    }
}

impl<P: FakeProvider> ValueSynthesizer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn synthesize(&mut self, category: &Category) -> FieldValue {
        synthesize(category, &mut self.provider)
    }

    /// Classify `field` and synthesize a value for its category.
    pub fn value_for(&mut self, field: &str, rules: &RuleSet) -> FieldValue {
        self.synthesize(&classify(field, rules))
    }
}
