use super::pension::DECUMULATION_RETURN_SHARE;
use super::types::WealthBalances;

/// Share of free savings and of every surplus that goes to the cash bucket; the rest is invested.
pub const CASH_SHARE: f64 = 0.30;
pub const OCCUPATIONAL_INTEREST_RATE: f64 = 0.0125;
pub const OCCUPATIONAL_CONTRIBUTION_RATE: f64 = 0.12;

#[derive(Debug, Clone, Copy)]
pub struct WorkingContributions {
    pub gross_salaries: f64,
    pub planned_pillar3: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerOutcome {
    pub pillar3_contribution: f64,
    pub unfunded_shortfall: f64,
}

#[derive(Debug, Clone)]
pub struct WealthLedger {
    cash: f64,
    invested: f64,
    pillar2: f64,
    pillar3: f64,
    investment_return: f64,
}

impl WealthLedger {
    pub fn new(savings: f64, pillar2: f64, pillar3: f64, investment_return: f64) -> Self {
        let savings = savings.max(0.0);
        Self {
            cash: savings * CASH_SHARE,
            invested: savings * (1.0 - CASH_SHARE),
            pillar2: pillar2.max(0.0),
            pillar3: pillar3.max(0.0),
            investment_return,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn invested(&self) -> f64 {
        self.invested
    }

    pub fn pillar2(&self) -> f64 {
        self.pillar2
    }

    pub fn pillar3(&self) -> f64 {
        self.pillar3
    }

    pub fn free_assets(&self) -> f64 {
        self.cash + self.invested
    }

    pub fn total(&self) -> f64 {
        self.cash + self.invested + self.pillar2 + self.pillar3
    }

    pub fn balances(&self) -> WealthBalances {
        WealthBalances {
            cash: self.cash,
            invested: self.invested,
            pillar2: self.pillar2,
            pillar3: self.pillar3,
            total: self.total(),
        }
    }

    pub fn take_pillar2(&mut self) -> f64 {
        std::mem::take(&mut self.pillar2)
    }

    pub fn draw_pillar3(&mut self, amount: f64) -> f64 {
        let paid = amount.max(0.0).min(self.pillar3);
        self.pillar3 = (self.pillar3 - paid).max(0.0);
        paid
    }

    pub fn advance(
        &mut self,
        net_cash_flow: f64,
        contributions: Option<WorkingContributions>,
    ) -> LedgerOutcome {
        let mut remaining = net_cash_flow;
        let mut pillar3_contribution = 0.0;

        match contributions {
            Some(working) => {
                self.pillar2 = (self.pillar2 * (1.0 + OCCUPATIONAL_INTEREST_RATE)
                    + working.gross_salaries.max(0.0) * OCCUPATIONAL_CONTRIBUTION_RATE)
                    .max(0.0);

                pillar3_contribution = working.planned_pillar3.max(0.0).min(net_cash_flow.max(0.0));
                self.pillar3 =
                    (self.pillar3 * (1.0 + self.investment_return) + pillar3_contribution).max(0.0);
                remaining -= pillar3_contribution;
            }
            None => {
                let residual_return = self.investment_return * DECUMULATION_RETURN_SHARE;
                self.pillar3 = (self.pillar3 * (1.0 + residual_return)).max(0.0);
            }
        }

        let unfunded_shortfall = self.allocate(remaining);
        self.invested = (self.invested * (1.0 + self.investment_return)).max(0.0);

        LedgerOutcome {
            pillar3_contribution,
            unfunded_shortfall,
        }
    }

    fn allocate(&mut self, amount: f64) -> f64 {
        if amount >= 0.0 {
            self.cash += amount * CASH_SHARE;
            self.invested += amount * (1.0 - CASH_SHARE);
            return 0.0;
        }

        let mut deficit = -amount;
        let from_cash = deficit.min(self.cash);
        self.cash = (self.cash - from_cash).max(0.0);
        deficit -= from_cash;

        let from_invested = deficit.min(self.invested);
        self.invested = (self.invested - from_invested).max(0.0);
        deficit -= from_invested;

        deficit.max(0.0)
    }
}
