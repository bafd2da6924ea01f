//! Spin request and outcome

use serde::{Deserialize, Serialize};

/// One spin request as seen by an engine.
///
/// The session fields identify the caller context; they take no part in
/// payout math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRequest {
    /// Number of paylines played
    pub lines_played: i32,
    /// Bet placed on every played line
    pub bet_per_line: i64,
    /// Is this a free spin (no bet taken)?
    pub is_free_spin: bool,
    pub user_id: String,
    pub session_id: i32,
    pub round_id: i32,
    pub operator_id: i32,
    pub platform_id: i32,
}

impl SpinRequest {
    /// Create a paid spin request with neutral session fields
    pub fn new(lines_played: i32, bet_per_line: i64) -> Self {
        Self {
            lines_played,
            bet_per_line,
            is_free_spin: false,
            user_id: String::new(),
            session_id: 0,
            round_id: 0,
            operator_id: 0,
            platform_id: 0,
        }
    }

    /// Builder: set user ID
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Builder: set all session context identifiers at once
    pub fn with_context(mut self, session_id: i32, round_id: i32, operator_id: i32, platform_id: i32) -> Self {
        self.session_id = session_id;
        self.round_id = round_id;
        self.operator_id = operator_id;
        self.platform_id = platform_id;
        self
    }

    /// Total amount staked by this request (0 for free spins)
    pub fn total_bet_amount(&self) -> i64 {
        if self.is_free_spin {
            0
        } else {
            (self.lines_played as i64).saturating_mul(self.bet_per_line)
        }
    }
}

/// Money movement produced by one spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Amount paid back to the player
    pub balance_delta: i64,
    /// Amount staked
    pub total_bet_amount: i64,
}

impl SpinOutcome {
    pub fn new(balance_delta: i64, total_bet_amount: i64) -> Self {
        Self {
            balance_delta,
            total_bet_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_bet_amount() {
        let request = SpinRequest::new(20, 5);
        assert_eq!(request.total_bet_amount(), 100);

        let mut free = SpinRequest::new(20, 5);
        free.is_free_spin = true;
        assert_eq!(free.total_bet_amount(), 0);
    }

    #[test]
    fn test_builders() {
        let request = SpinRequest::new(1, 1).with_user("testUser").with_context(1, 2, 3, 4);
        assert_eq!(request.user_id, "testUser");
        assert_eq!(request.round_id, 2);
        assert_eq!(request.platform_id, 4);
    }
}
