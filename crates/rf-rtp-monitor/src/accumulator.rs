//! RTP accounting for one run

use rf_slot_lab::SpinOutcome;
use serde::{Deserialize, Serialize};

/// Running win/bet totals of a verification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAccumulator {
    pub engine_id: String,
    pub win_total: i64,
    pub bet_total: i64,
    /// Successful spins folded in so far
    pub spin_count: u32,
}

impl RunAccumulator {
    pub fn new(engine_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            ..Default::default()
        }
    }

    /// Fold one successful spin into the totals
    pub fn accumulate(&mut self, outcome: &SpinOutcome) {
        self.win_total = self.win_total.saturating_add(outcome.balance_delta);
        self.bet_total = self.bet_total.saturating_add(outcome.total_bet_amount);
        self.spin_count = self.spin_count.saturating_add(1);
    }

    /// Realized RTP as `win_total / bet_total`, or NaN when nothing was staked
    pub fn finalize(&self) -> f32 {
        if self.bet_total == 0 {
            return f32::NAN;
        }
        self.win_total as f32 / self.bet_total as f32
    }

    pub fn has_stake(&self) -> bool {
        self.bet_total != 0
    }
}
