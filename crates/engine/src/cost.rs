use std::fmt;

use crate::{EngineError, ResultEngine};

/// Non-negative expense amount represented as **integer cents**.
///
/// Costs are summed into report totals, so they never go through floating
/// point inside the engine. Conversions to and from `f64` only happen at the
/// wire boundary.
///
/// # Examples
///
/// ```rust
/// use engine::Cost;
///
/// let cost = Cost::from_cents(12_34).unwrap();
/// assert_eq!(cost.cents(), 1234);
/// assert_eq!(cost.to_string(), "12.34");
/// assert!(Cost::from_cents(-1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Cost(i64);

/// Slack allowed when turning a float into cents, so `19.99` (which is
/// `1998.9999…` once scaled) still counts as two decimals.
const CENTS_EPSILON: f64 = 1e-6;

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Largest single cost: 2^53 cents, the last value an `f64` holds exactly.
    pub const MAX: Cost = Cost(1 << 53);

    /// Creates a cost from integer cents.
    pub fn from_cents(cents: i64) -> ResultEngine<Self> {
        if cents < 0 {
            return Err(EngineError::InvalidAmount(
                "cost must not be negative".to_string(),
            ));
        }
        if cents > Self::MAX.0 {
            return Err(EngineError::InvalidAmount("cost too large".to_string()));
        }
        Ok(Self(cents))
    }

    /// Converts a wire amount (major units) into cents.
    ///
    /// Rejects NaN/infinite values, negative values, values above
    /// [`Cost::MAX`] and values with more than two fractional digits.
    pub fn try_from_f64(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(
                "cost must be a finite number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(EngineError::InvalidAmount(
                "cost must not be negative".to_string(),
            ));
        }

        let scaled = value * 100.0;
        if scaled > Self::MAX.0 as f64 {
            return Err(EngineError::InvalidAmount("cost too large".to_string()));
        }
        let rounded = scaled.round();
        if (scaled - rounded).abs() > CENTS_EPSILON {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }

        Self::from_cents(rounded as i64)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount in major units for the wire.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Cost) -> Option<Cost> {
        self.0.checked_add(rhs.0).map(Cost)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Cost::ZERO.to_string(), "0.00");
        assert_eq!(Cost(1).to_string(), "0.01");
        assert_eq!(Cost(1050).to_string(), "10.50");
        assert_eq!(Cost(9500).to_string(), "95.00");
    }

    #[test]
    fn from_f64_keeps_cents_exact() {
        assert_eq!(Cost::try_from_f64(15.0).unwrap().cents(), 1500);
        assert_eq!(Cost::try_from_f64(19.99).unwrap().cents(), 1999);
        assert_eq!(Cost::try_from_f64(0.1).unwrap().cents(), 10);
        assert_eq!(Cost::try_from_f64(0.0).unwrap(), Cost::ZERO);
    }

    #[test]
    fn from_f64_rejects_invalid_values() {
        assert!(Cost::try_from_f64(-1.0).is_err());
        assert!(Cost::try_from_f64(f64::NAN).is_err());
        assert!(Cost::try_from_f64(f64::INFINITY).is_err());
        assert!(Cost::try_from_f64(1.005).is_err());
    }

    #[test]
    fn huge_costs_are_rejected() {
        let too_large = EngineError::InvalidAmount("cost too large".to_string());
        assert_eq!(Cost::try_from_f64(9e16), Err(too_large));
        assert!(Cost::from_cents(Cost::MAX.cents() + 1).is_err());
        assert!(Cost::from_cents(i64::MAX).is_err());
        assert_eq!(Cost::from_cents(Cost::MAX.cents()), Ok(Cost::MAX));
    }

    #[test]
    fn negative_cents_are_rejected() {
        assert_eq!(
            Cost::from_cents(-1),
            Err(EngineError::InvalidAmount(
                "cost must not be negative".to_string()
            ))
        );
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(Cost(1500).checked_add(Cost(6000)), Some(Cost(7500)));
        assert_eq!(Cost(i64::MAX).checked_add(Cost(1)), None);
    }
}
