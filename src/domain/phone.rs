//! Phone number normalization and the NormalizedPhone value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Calling code assumed for bare 10-digit numbers (India).
pub const DEFAULT_COUNTRY_CODE: &str = "91";

const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 15;

// ASCII digits only; `\D` is Unicode-aware.
static NON_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("Failed to compile non-digit regex"));

fn strip_non_digits(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

fn digit_count_in_range(digits: &str) -> bool {
    let count = digits.chars().filter(char::is_ascii_digit).count();
    (MIN_DIGITS..=MAX_DIGITS).contains(&count)
}

/// A phone number in `+<country><subscriber>` form.
///
/// Holds a `+` followed by 10 to 15 digits. Values come out of
/// [`PhoneNormalizer::parse`] or out of deserialization, which re-checks
/// the shape.
///
/// # Example
///
/// ```
/// use animia_sms_dispatch::domain::PhoneNormalizer;
///
/// let phone = PhoneNormalizer::default().parse("98765 43210").unwrap();
/// assert_eq!(phone.as_str(), "+919876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    /// Accept an already-normalized string, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` unless the value is `+`
    /// followed by 10 to 15 ASCII digits.
    pub fn from_normalized(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let well_formed = value
            .strip_prefix('+')
            .map(|digits| {
                digits.chars().all(|c| c.is_ascii_digit()) && digit_count_in_range(digits)
            })
            .unwrap_or(false);

        if !well_formed {
            return Err(ValidationError::InvalidPhone(value));
        }
        Ok(Self(value))
    }

    /// Get the phone number as a string slice, including the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digits without the leading `+`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for NormalizedPhone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NormalizedPhone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NormalizedPhone::from_normalized(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turns raw user input into canonical phone numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNormalizer {
    country_code: String,
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}

impl PhoneNormalizer {
    /// Create a normalizer for the given calling code (with or without `+`).
    pub fn new(country_code: impl Into<String>) -> Self {
        let country_code = country_code.into();
        Self {
            country_code: country_code.trim_start_matches('+').to_string(),
        }
    }

    /// The calling code prepended to bare 10-digit numbers, without `+`.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Best-effort normalization that never fails.
    ///
    /// - 10 digits: default country code is prepended
    /// - 12 digits starting with the country code: `+` is prepended
    /// - anything else: `+` followed by whatever digits remain
    ///
    /// Input without any digit yields an empty string. Malformed input still
    /// produces a `+<digits>` string; use [`parse`](Self::parse) when the
    /// result must be dialable.
    pub fn normalize(&self, raw: &str) -> String {
        let digits = strip_non_digits(raw);
        if digits.is_empty() {
            return String::new();
        }

        // 12 digits with the country code, input that already carried a `+`,
        // and the lenient fallback all reduce to `+<digits>`.
        if digits.len() == 10 {
            format!("+{}{}", self.country_code, digits)
        } else {
            format!("+{}", digits)
        }
    }

    /// True iff the digit count of `raw` is between 10 and 15.
    pub fn is_valid(&self, raw: &str) -> bool {
        digit_count_in_range(&strip_non_digits(raw))
    }

    /// Validate and normalize.
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingPhone` for blank input
    /// - `ValidationError::InvalidPhone` when the digit count is outside 10..=15
    pub fn parse(&self, raw: &str) -> Result<NormalizedPhone, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        if !self.is_valid(raw) {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }
        NormalizedPhone::from_normalized(self.normalize(raw))
    }
}

/// [`PhoneNormalizer::normalize`] with the default country code.
pub fn normalize(raw: &str) -> String {
    PhoneNormalizer::default().normalize(raw)
}

/// [`PhoneNormalizer::is_valid`]; independent of the country code.
pub fn is_valid(raw: &str) -> bool {
    digit_count_in_range(&strip_non_digits(raw))
}
