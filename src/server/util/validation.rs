//! Field format rules for customer registration, vehicles and password changes.

use std::sync::LazyLock;

use regex::Regex;

static GMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@gmail\.com$").unwrap());
static SEVEN_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{7}$").unwrap());
static NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").unwrap());
static LICENSE_PLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2} [0-9]{3}$").unwrap());
static VIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{17}$").unwrap());

pub fn is_gmail(email: &str) -> bool {
    GMAIL.is_match(email)
}

pub fn is_phone_number(phone: &str) -> bool {
    SEVEN_DIGITS.is_match(phone)
}

pub fn is_drivers_license(license: &str) -> bool {
    SEVEN_DIGITS.is_match(license)
}

pub fn is_name(name: &str) -> bool {
    NAME.is_match(name)
}

pub fn is_license_plate(plate: &str) -> bool {
    LICENSE_PLATE.is_match(plate)
}

pub fn is_vin(vin: &str) -> bool {
    VIN.is_match(vin)
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a digit and a
/// character that is none of those.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}
