//! Bill-step input limits and the reaction tier shown next to the slider.

use serde::{Deserialize, Serialize};

/// Accepted range of the monthly bill input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillLimits {
    /// Smallest accepted bill (inclusive).
    pub bill_min: f64,
    /// Largest accepted bill (inclusive).
    pub bill_max: f64,
    /// Pre-filled bill of a fresh session.
    pub default_bill: f64,
}

impl Default for BillLimits {
    fn default() -> Self {
        Self {
            bill_min: 20_000.0,
            bill_max: 600_000.0,
            default_bill: 80_000.0,
        }
    }
}

impl BillLimits {
    /// Whether `bill` is finite and inside `[bill_min, bill_max]`.
    pub fn accepts(&self, bill: f64) -> bool {
        bill.is_finite() && (self.bill_min..=self.bill_max).contains(&bill)
    }
}

/// How a monthly bill amount is characterized to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillReaction {
    /// Below 50 000.
    Efficient,
    /// Below 100 000.
    Normal,
    /// Below 200 000.
    CouldSave,
    /// Below 400 000.
    High,
    /// 400 000 and above.
    BurningMoney,
}

impl BillReaction {
    /// Classifies a monthly bill.
    pub fn for_bill(bill: f64) -> Self {
        if bill < 50_000.0 {
            Self::Efficient
        } else if bill < 100_000.0 {
            Self::Normal
        } else if bill < 200_000.0 {
            Self::CouldSave
        } else if bill < 400_000.0 {
            Self::High
        } else {
            Self::BurningMoney
        }
    }

    /// Short label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Efficient => "Efficient consumption",
            Self::Normal => "Normal consumption",
            Self::CouldSave => "You could save",
            Self::High => "High spending",
            Self::BurningMoney => "You are burning money!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_tiers() {
        assert_eq!(BillReaction::for_bill(20_000.0), BillReaction::Efficient);
        assert_eq!(BillReaction::for_bill(49_999.0), BillReaction::Efficient);
        assert_eq!(BillReaction::for_bill(50_000.0), BillReaction::Normal);
        assert_eq!(BillReaction::for_bill(100_000.0), BillReaction::CouldSave);
        assert_eq!(BillReaction::for_bill(399_999.0), BillReaction::High);
        assert_eq!(BillReaction::for_bill(400_000.0), BillReaction::BurningMoney);
    }

    #[test]
    fn limits_are_inclusive() {
        let l = BillLimits::default();
        assert!(l.accepts(20_000.0));
        assert!(l.accepts(600_000.0));
        assert!(!l.accepts(19_999.0));
        assert!(!l.accepts(600_001.0));
        assert!(!l.accepts(f64::NAN));
    }
}
