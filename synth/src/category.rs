//! Semantic categories a request field can fall into.

use std::fmt;

/// What kind of value a field expects, as inferred from its name and rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Email,
    CompanyName,
    Address,
    PersonName,
    StreetName,
    StreetAddress,
    City,
    State,
    Country,
    ZipCode,
    Latitude,
    Longitude,
    Phone,
    Boolean,
    Date,
    /// A date rendered with a PHP `date()` pattern. The pattern is empty
    /// when the `date_format` rule carries no parameter.
    DateWithFormat(String),
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::CompanyName => "company_name",
            Category::Address => "address",
            Category::PersonName => "person_name",
            Category::StreetName => "street_name",
            Category::StreetAddress => "street_address",
            Category::City => "city",
            Category::State => "state",
            Category::Country => "country",
            Category::ZipCode => "zip_code",
            Category::Latitude => "latitude",
            Category::Longitude => "longitude",
            Category::Phone => "phone",
            Category::Boolean => "boolean",
            Category::Date => "date",
            Category::DateWithFormat(_) => "date_with_format",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::DateWithFormat(format) => write!(f, "date_with_format({})", format),
            other => f.write_str(other.as_str()),
        }
    }
}
