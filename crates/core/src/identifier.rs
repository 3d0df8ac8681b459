//! CPF (Cadastro de Pessoas Físicas) validation, normalisation and display.
//!
//! A CPF is 11 decimal digits: 9 base digits followed by two check digits
//! computed with the national modulo-11 scheme. Raw input may carry the
//! conventional `XXX.XXX.XXX-XX` mask or any other punctuation; every
//! non-digit character is ignored before checking.
//!
//! CPF is the canonical login/uniqueness identifier for staff accounts and
//! is stored in its 11-digit normalised form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of digits in a normalised CPF.
pub const CPF_LENGTH: usize = 11;

/// Enrollment numbers are a four-digit year followed by eight digits.
pub const MATRICULA_LENGTH: usize = 12;

/// Earliest enrollment year accepted in a matrícula.
pub const MATRICULA_MIN_YEAR: u32 = 2019;

/// Latest enrollment year accepted in a matrícula.
pub const MATRICULA_MAX_YEAR: u32 = 2039;

// ---------------------------------------------------------------------------
// Checksum
// ---------------------------------------------------------------------------

/// Extract the ASCII digits of `raw` as numeric values.
fn digits_of(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Compute one check digit over `digits` with weights starting at
/// `digits.len() + 1` and descending to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    let d = 11 - (sum % 11);
    if d > 9 {
        0
    } else {
        d
    }
}

/// Validate a CPF number.
///
/// Punctuation is ignored. Returns `false` for anything other than 11
/// digits, for degenerate repeated-digit sequences such as `00000000000`,
/// and when either check digit does not match.
pub fn validate(raw: &str) -> bool {
    let digits = digits_of(raw);
    if digits.len() != CPF_LENGTH {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    if check_digit(&digits[..9]) != digits[9] {
        return false;
    }
    check_digit(&digits[..10]) == digits[10]
}

/// Return the 11-digit canonical form of a valid CPF, or `None`.
pub fn normalize(raw: &str) -> Option<String> {
    if !validate(raw) {
        return None;
    }
    Some(raw.chars().filter(char::is_ascii_digit).collect())
}

/// Render a valid CPF with the `XXX.XXX.XXX-XX` mask, or `None`.
pub fn format(raw: &str) -> Option<String> {
    normalize(raw).map(|d| mask(&d))
}

/// Apply the display mask to an already-normalised 11-digit string.
fn mask(digits: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

// ---------------------------------------------------------------------------
// Cpf newtype
// ---------------------------------------------------------------------------

/// A checksum-valid CPF in normalised form.
///
/// Serializes as the bare 11 digits; [`fmt::Display`] renders the mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parse and normalise a raw CPF string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        normalize(raw)
            .map(Cpf)
            .ok_or_else(|| CoreError::Validation(format!("Invalid CPF '{raw}'")))
    }

    /// The normalised 11 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cpf {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cpf::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Matrícula
// ---------------------------------------------------------------------------

/// Validate a student enrollment number (matrícula).
///
/// Must be exactly 12 ASCII digits whose first four form a year between
/// [`MATRICULA_MIN_YEAR`] and [`MATRICULA_MAX_YEAR`].
pub fn validate_matricula(raw: &str) -> Result<(), String> {
    let invalid = || {
        format!(
            "Invalid matrícula '{raw}'. Must be {MATRICULA_LENGTH} digits starting with \
             a year between {MATRICULA_MIN_YEAR} and {MATRICULA_MAX_YEAR}"
        )
    };

    if raw.len() != MATRICULA_LENGTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: u32 = raw[..4].parse().map_err(|_| invalid())?;
    if !(MATRICULA_MIN_YEAR..=MATRICULA_MAX_YEAR).contains(&year) {
        return Err(invalid());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
