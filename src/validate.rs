//! Submit-time validation of a [`UserRecord`].
//!
//! Validation produces data, not errors: a map from field path to the message
//! shown under that field in the form. An empty map means the record may be
//! submitted.
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use crate::model::UserRecord;

pub const MIN_NAME_LEN: usize = 3;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s-]+$").expect("phone pattern"));

/// Fields that carry a validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Name,
    Email,
    Phone,
    Street,
    City,
}

impl FieldPath {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldPath::Name => "name",
            FieldPath::Email => "email",
            FieldPath::Phone => "phone",
            FieldPath::Street => "address.street",
            FieldPath::City => "address.city",
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldPath, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: FieldPath) -> Option<&'static str> {
        self.0.get(&path).copied()
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    fn insert(&mut self, path: FieldPath, message: &'static str) {
        self.0.insert(path, message);
    }
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn is_valid_phone(s: &str) -> bool {
    PHONE_RE.is_match(s)
}

/// Check the five required-field rules. Username, website and company are
/// never inspected.
pub fn validate(record: &UserRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    // Counts chars (scalar values), not UTF-16 units.
    if record.name.chars().count() < MIN_NAME_LEN {
        errors.insert(
            FieldPath::Name,
            "Name is required and must be at least 3 characters",
        );
    }
    if !is_valid_email(&record.email) {
        errors.insert(FieldPath::Email, "Valid email is required");
    }
    if !is_valid_phone(&record.phone) {
        errors.insert(FieldPath::Phone, "Valid phone number is required");
    }
    if record.address.street.is_empty() {
        errors.insert(FieldPath::Street, "Street is required");
    }
    if record.address.city.is_empty() {
        errors.insert(FieldPath::City, "City is required");
    }

    errors
}
