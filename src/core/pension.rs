use serde::Serialize;

use super::types::{HORIZON_AGE, PensionBreakdown};

/// Couple maximum in start-year money, re-indexed on baseline inflation.
pub const PUBLIC_PENSION_COUPLE_ANNUAL: f64 = 44_100.0;
pub const OCCUPATIONAL_CONVERSION_RATE: f64 = 0.058;
/// Share of the investment return the private pension still earns while being drawn down.
pub const DECUMULATION_RETURN_SHARE: f64 = 0.30;
pub const RETIREMENT_NET_FACTOR: f64 = 0.85;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSnapshot {
    pub retirement_age: u32,
    pub public_pension_at_retirement: f64,
    pub occupational_annuity: f64,
    pub private_drawdown: f64,
}

impl RetirementSnapshot {
    pub fn compute(
        retirement_age: u32,
        inflation_factor: f64,
        occupational_capital: f64,
        private_capital: f64,
    ) -> Self {
        let remaining_years = HORIZON_AGE.saturating_sub(retirement_age).max(1);
        Self {
            retirement_age,
            public_pension_at_retirement: PUBLIC_PENSION_COUPLE_ANNUAL * inflation_factor,
            occupational_annuity: occupational_capital.max(0.0) * OCCUPATIONAL_CONVERSION_RATE,
            private_drawdown: private_capital.max(0.0) / remaining_years as f64,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PensionPhase {
    Working,
    Retired(RetirementSnapshot),
}

#[derive(Debug, Clone)]
pub struct PensionModel {
    phase: PensionPhase,
}

impl Default for PensionModel {
    fn default() -> Self {
        Self {
            phase: PensionPhase::Working,
        }
    }
}

impl PensionModel {
    pub fn phase(&self) -> PensionPhase {
        self.phase
    }

    pub fn is_retired(&self) -> bool {
        matches!(self.phase, PensionPhase::Retired(_))
    }

    pub fn snapshot(&self) -> Option<RetirementSnapshot> {
        match self.phase {
            PensionPhase::Working => None,
            PensionPhase::Retired(snapshot) => Some(snapshot),
        }
    }

    pub fn retire(
        &mut self,
        age: u32,
        inflation_factor: f64,
        occupational_capital: f64,
        private_capital: f64,
    ) -> RetirementSnapshot {
        if let PensionPhase::Retired(snapshot) = self.phase {
            return snapshot;
        }
        let snapshot =
            RetirementSnapshot::compute(age, inflation_factor, occupational_capital, private_capital);
        self.phase = PensionPhase::Retired(snapshot);
        snapshot
    }

    pub fn private_drawdown(&self) -> f64 {
        self.snapshot().map_or(0.0, |snapshot| snapshot.private_drawdown)
    }

    /// `private_paid` is what the ledger actually released, which may fall short of the planned
    /// drawdown once the private balance runs low.
    pub fn yearly_payout(&self, inflation_factor: f64, private_paid: f64) -> PensionBreakdown {
        let PensionPhase::Retired(snapshot) = self.phase else {
            return PensionBreakdown::default();
        };
        let public = PUBLIC_PENSION_COUPLE_ANNUAL * inflation_factor;
        let occupational = snapshot.occupational_annuity;
        let private = private_paid.max(0.0);
        let gross = public + occupational + private;
        PensionBreakdown {
            public,
            occupational,
            private,
            gross,
            net: gross * RETIREMENT_NET_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn snapshot_converts_capital_and_spreads_private_balance() {
        let snapshot = RetirementSnapshot::compute(65, 1.5, 500_000.0, 250_000.0);
        assert_approx(snapshot.public_pension_at_retirement, 66_150.0);
        assert_approx(snapshot.occupational_annuity, 29_000.0);
        assert_approx(snapshot.private_drawdown, 10_000.0);
    }

    #[test]
    fn snapshot_guards_zero_remaining_years() {
        let snapshot = RetirementSnapshot::compute(90, 1.0, 0.0, 80_000.0);
        assert_approx(snapshot.private_drawdown, 80_000.0);
        let snapshot = RetirementSnapshot::compute(95, 1.0, 0.0, 80_000.0);
        assert_approx(snapshot.private_drawdown, 80_000.0);
    }

    #[test]
    fn retire_fires_once_and_keeps_first_snapshot() {
        let mut model = PensionModel::default();
        assert!(!model.is_retired());
        assert_eq!(model.yearly_payout(1.0, 1_000.0), PensionBreakdown::default());

        let first = model.retire(60, 1.2, 100_000.0, 30_000.0);
        let second = model.retire(61, 2.0, 999_999.0, 999_999.0);
        assert_eq!(first, second);
        assert_eq!(model.snapshot(), Some(first));
        assert_eq!(model.phase(), PensionPhase::Retired(first));
    }

    #[test]
    fn payout_reinflates_public_and_reports_private_paid() {
        let mut model = PensionModel::default();
        assert_eq!(model.private_drawdown(), 0.0);
        model.retire(80, 1.0, 100_000.0, 50_000.0);
        assert_approx(model.private_drawdown(), 5_000.0);

        let year = model.yearly_payout(1.1, model.private_drawdown());
        assert_approx(year.public, PUBLIC_PENSION_COUPLE_ANNUAL * 1.1);
        assert_approx(year.occupational, 5_800.0);
        assert_approx(year.private, 5_000.0);
        assert_approx(year.net, year.gross * RETIREMENT_NET_FACTOR);

        let late = model.yearly_payout(1.3, 1_200.0);
        assert_approx(late.occupational, 5_800.0);
        assert_approx(late.private, 1_200.0);
        assert!(late.public > year.public);
    }
}
