//! Display formatting for aggregated amounts
//!
//! Each formatter is a small `Display` newtype. Rounding to two fraction
//! digits with round-half-to-even happens here and only here; the
//! aggregates handed in are always exact.
//!
//! # Examples
//!
//! ```
//! use costminer_core::formatters::{Hours, Money, Percent};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(Money::from(Decimal::new(125, 3)).to_string(), "$0.12");
//! assert_eq!(Money::absent().to_string(), "");
//! assert_eq!(Hours(Decimal::from(9)).to_string(), "9.00h");
//! assert_eq!(Percent::of(Decimal::from(5), Decimal::from(9)).to_string(), "55.56%");
//! assert_eq!(Percent::of(Decimal::from(5), Decimal::ZERO).to_string(), "0.00%");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;
use std::fmt;

/// Fraction digits shown for every formatted amount
const DISPLAY_SCALE: u32 = 2;

/// Round half-to-even and pad to exactly [`DISPLAY_SCALE`] fraction digits
fn to_display(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(DISPLAY_SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// `part / whole * 100`, defined as zero when `whole` is zero
///
/// A share too large for a `Decimal` saturates at `Decimal::MAX` (or
/// `Decimal::MIN` when the signs differ).
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            warn!("Percentage of {part} in {whole} overflows, saturating");
            if part.is_sign_negative() == whole.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

/// A dollar amount, or no data at all
///
/// Absence renders as an empty string so a table cell stays blank instead of
/// claiming a zero cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Option<Decimal>);

impl Money {
    /// Explicit "no data" value
    pub fn absent() -> Self {
        Self(None)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(Some(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(amount) => write!(f, "${}", to_display(amount)),
            None => Ok(()),
        }
    }
}

/// A duration in hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hours(pub Decimal);

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", to_display(self.0))
    }
}

/// A percentage value, already multiplied by 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub Decimal);

impl Percent {
    /// Share of `part` in `whole`; zero when `whole` is zero
    pub fn of(part: Decimal, whole: Decimal) -> Self {
        Self(percent_of(part, whole))
    }

    /// The whole of a group
    pub fn full() -> Self {
        Self(Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", to_display(self.0))
    }
}
