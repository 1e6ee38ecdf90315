//! Fake-data providers.
//!
//! [`FakeProvider`] is the capability set the synthesizer draws from.
//! [`FakerProvider`] implements it on top of the `fake` crate with an owned
//! random source, so seeding the source makes a run reproducible.

use chrono::{DateTime, Utc};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, StateAbbr, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::php_date::{format_php_date, DEFAULT_DATE_FORMAT};

/// Source of fake values, one method per capability.
pub trait FakeProvider {
    fn email(&mut self) -> String;
    fn company(&mut self) -> String;
    /// A full postal address, possibly spanning several lines.
    fn address(&mut self) -> String;
    fn name(&mut self) -> String;
    fn street_name(&mut self) -> String;
    fn street_address(&mut self) -> String;
    fn city(&mut self) -> String;
    fn state(&mut self) -> String;
    fn country(&mut self) -> String;
    fn postcode(&mut self) -> String;
    fn latitude(&mut self) -> f64;
    fn longitude(&mut self) -> f64;
    /// A phone number in E.164 form, e.g. `+14155550123`.
    fn e164_phone_number(&mut self) -> String;
    /// A date rendered with a PHP `date()` pattern.
    fn date_with_format(&mut self, pattern: &str) -> String;
    fn boolean(&mut self) -> bool;

    /// A date as `Y-m-d`.
    fn date(&mut self) -> String {
        self.date_with_format(DEFAULT_DATE_FORMAT)
    }
}

/// [`FakeProvider`] backed by the `fake` crate.
pub struct FakerProvider<R: Rng = StdRng> {
    rng: R,
    /// Latest instant a generated date may fall on.
    latest: DateTime<Utc>,
}

impl FakerProvider<StdRng> {
    /// A provider seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A provider whose values are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FakerProvider<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            latest: Utc::now(),
        }
    }

    /// Bound generated dates to `latest` instead of the current time.
    pub fn with_latest_date(mut self, latest: DateTime<Utc>) -> Self {
        self.latest = latest;
        self
    }

    /// A random instant between the Unix epoch and the latest date.
    fn instant(&mut self) -> DateTime<Utc> {
        let upper = self.latest.timestamp().max(0);
        let secs = self.rng.gen_range(0..=upper);
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    fn coordinate(&mut self, bound: f64) -> f64 {
        let raw: f64 = self.rng.gen_range(-bound..=bound);
        (raw * 1_000_000.0).round() / 1_000_000.0
    }

    fn digit(&mut self, low: u8) -> char {
        char::from(b'0' + self.rng.gen_range(low..=9))
    }
}

impl<R: Rng> FakeProvider for FakerProvider<R> {
    fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }

    fn company(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    fn address(&mut self) -> String {
        let street = self.street_address();
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        let postcode = self.postcode();
        format!("{}\n{}, {} {}", street, city, state, postcode)
    }

    fn name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    fn street_name(&mut self) -> String {
        StreetName().fake_with_rng(&mut self.rng)
    }

    fn street_address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street = self.street_name();
        format!("{} {}", number, street)
    }

    fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    fn state(&mut self) -> String {
        StateName().fake_with_rng(&mut self.rng)
    }

    fn country(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }

    fn postcode(&mut self) -> String {
        ZipCode().fake_with_rng(&mut self.rng)
    }

    fn latitude(&mut self) -> f64 {
        self.coordinate(90.0)
    }

    fn longitude(&mut self) -> f64 {
        self.coordinate(180.0)
    }

    fn e164_phone_number(&mut self) -> String {
        // +1 NXX NXX XXXX
        let mut number = String::from("+1");
        for position in 0..10 {
            let low = if position == 0 || position == 3 { 2 } else { 0 };
            number.push(self.digit(low));
        }
        number
    }

    fn date_with_format(&mut self, pattern: &str) -> String {
        let instant = self.instant();
        format_php_date(&instant, pattern)
    }

    fn boolean(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
