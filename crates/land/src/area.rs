//! Area measurements and the parcel area invariant.

use core::ops::{Add, Sub};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use agroreg_core::{DomainError, DomainResult, ValueObject};

/// Message used whenever `arable + vegetation > total`.
pub const AREA_SUM_EXCEEDS_TOTAL: &str = "sum of areas exceeds total area";

/// An area in hectares, kept as an exact decimal.
///
/// Sums never go through binary floating point; round with [`Hectares::rounded`]
/// only when presenting a value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Hectares(Decimal);

impl ValueObject for Hectares {}

impl Hectares {
    pub const ZERO: Hectares = Hectares(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Two-decimal value for display (half away from zero).
    pub fn rounded(self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl From<Decimal> for Hectares {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u32> for Hectares {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Hectares {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid area '{s}': {e}")))
    }
}

impl core::fmt::Display for Hectares {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Hectares {
    type Output = Hectares;

    fn add(self, rhs: Self) -> Self::Output {
        Hectares(self.0 + rhs.0)
    }
}

impl Sub for Hectares {
    type Output = Hectares;

    fn sub(self, rhs: Self) -> Self::Output {
        Hectares(self.0 - rhs.0)
    }
}

impl core::iter::Sum for Hectares {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hectares::ZERO, Add::add)
    }
}

/// Returns true iff `arable + vegetation <= total`.
///
/// Inputs are expected to be non-negative; callers reject negative areas
/// before asking. Equality with the total is allowed.
pub fn check_area_invariant(total: Hectares, arable: Hectares, vegetation: Hectares) -> bool {
    arable + vegetation <= total
}

/// The three area measurements of a parcel, checked together.
///
/// Construction and deserialization both enforce non-negative values and the
/// area invariant, so a held `AreaBreakdown` is always consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAreaBreakdown")]
pub struct AreaBreakdown {
    total: Hectares,
    arable: Hectares,
    vegetation: Hectares,
}

impl ValueObject for AreaBreakdown {}

#[derive(Deserialize)]
struct RawAreaBreakdown {
    total: Hectares,
    arable: Hectares,
    vegetation: Hectares,
}

impl TryFrom<RawAreaBreakdown> for AreaBreakdown {
    type Error = DomainError;

    fn try_from(raw: RawAreaBreakdown) -> Result<Self, Self::Error> {
        AreaBreakdown::new(raw.total, raw.arable, raw.vegetation)
    }
}

impl AreaBreakdown {
    pub fn new(total: Hectares, arable: Hectares, vegetation: Hectares) -> DomainResult<Self> {
        for (field, value) in [("total", total), ("arable", arable), ("vegetation", vegetation)] {
            if value.is_negative() {
                return Err(DomainError::validation(format!(
                    "{field} area cannot be negative"
                )));
            }
        }

        if !check_area_invariant(total, arable, vegetation) {
            return Err(DomainError::invariant(AREA_SUM_EXCEEDS_TOTAL));
        }

        Ok(Self {
            total,
            arable,
            vegetation,
        })
    }

    pub fn total(&self) -> Hectares {
        self.total
    }

    pub fn arable(&self) -> Hectares {
        self.arable
    }

    pub fn vegetation(&self) -> Hectares {
        self.vegetation
    }

    /// Area neither arable nor vegetation.
    pub fn unallocated(&self) -> Hectares {
        self.total - self.arable - self.vegetation
    }

    /// Re-evaluates the invariant over the current values.
    pub fn is_consistent(&self) -> bool {
        check_area_invariant(self.total, self.arable, self.vegetation)
    }
}
