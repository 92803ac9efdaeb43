use serde::{Deserialize, Serialize};

use agroreg_core::{DomainError, DomainResult, ValueObject};

const INDIVIDUAL_LEN: usize = 11;
const ORGANIZATION_LEN: usize = 14;

/// Organization check-digit weights for the second pass.
///
/// The first pass uses the same sequence without the leading `6`.
const ORGANIZATION_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Kind of taxpayer a document identifies, decided by normalized length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxIdKind {
    /// Natural person (CPF, 11 digits).
    Individual,
    /// Legal person (CNPJ, 14 digits).
    Organization,
}

impl TaxIdKind {
    pub fn digit_count(self) -> usize {
        match self {
            TaxIdKind::Individual => INDIVIDUAL_LEN,
            TaxIdKind::Organization => ORGANIZATION_LEN,
        }
    }

    /// Short document label (`CPF` / `CNPJ`).
    pub fn label(self) -> &'static str {
        match self {
            TaxIdKind::Individual => "CPF",
            TaxIdKind::Organization => "CNPJ",
        }
    }
}

/// Strip every character that is not an ASCII decimal digit.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Classify a raw document by its normalized digit count.
///
/// This says nothing about checksum validity.
pub fn classify(raw: &str) -> Option<TaxIdKind> {
    kind_for_len(normalize(raw).len())
}

/// Validate a raw tax identifier (formatted or bare digits).
///
/// Never panics: wrong length, degenerate patterns and checksum mismatches
/// all yield `false`.
pub fn is_valid_tax_id(raw: &str) -> bool {
    let digits = to_digits(&normalize(raw));
    match kind_for_len(digits.len()) {
        Some(TaxIdKind::Individual) => is_valid_individual(&digits),
        Some(TaxIdKind::Organization) => is_valid_organization(&digits),
        None => false,
    }
}

fn kind_for_len(len: usize) -> Option<TaxIdKind> {
    match len {
        INDIVIDUAL_LEN => Some(TaxIdKind::Individual),
        ORGANIZATION_LEN => Some(TaxIdKind::Organization),
        _ => None,
    }
}

fn to_digits(normalized: &str) -> Vec<u32> {
    normalized.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn is_valid_individual(digits: &[u32]) -> bool {
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    individual_check_digit(&digits[..9]) == digits[9]
        && individual_check_digit(&digits[..10]) == digits[10]
}

/// Weights run from `len + 1` down to `2`.
fn individual_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    (sum * 10 % 11) % 10
}

fn is_valid_organization(digits: &[u32]) -> bool {
    organization_check_digit(&digits[..12]) == digits[12]
        && organization_check_digit(&digits[..13]) == digits[13]
}

/// Weights are the tail of [`ORGANIZATION_WEIGHTS`] matching `digits.len()`.
fn organization_check_digit(digits: &[u32]) -> u32 {
    let weights = &ORGANIZATION_WEIGHTS[ORGANIZATION_WEIGHTS.len() - digits.len()..];
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let digit = 11 - sum % 11;
    if digit > 9 { 0 } else { digit }
}

/// A checksum-valid tax identifier, stored as normalized digits.
///
/// Serializes as the bare digit string; deserialization goes through
/// [`TaxId::parse`], so an invalid document never becomes a `TaxId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId {
    digits: String,
    kind: TaxIdKind,
}

impl ValueObject for TaxId {}

impl TaxId {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits = normalize(raw);
        let kind = kind_for_len(digits.len()).ok_or_else(|| {
            DomainError::validation(format!(
                "invalid document: expected 11 or 14 digits, found {}",
                digits.len()
            ))
        })?;

        if !is_valid_tax_id(&digits) {
            return Err(DomainError::validation(format!(
                "invalid document: {} check digits do not match",
                kind.label()
            )));
        }

        Ok(Self { digits, kind })
    }

    pub fn kind(&self) -> TaxIdKind {
        self.kind
    }

    /// Normalized digits (no punctuation).
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Canonical mask: `000.000.000-00` or `00.000.000/0000-00`.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        match self.kind {
            TaxIdKind::Individual => {
                format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
            }
            TaxIdKind::Organization => format!(
                "{}.{}.{}/{}-{}",
                &d[0..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..14]
            ),
        }
    }
}

impl core::fmt::Display for TaxId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl core::str::FromStr for TaxId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.digits
    }
}
