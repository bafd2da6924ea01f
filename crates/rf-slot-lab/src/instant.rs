//! Weighted prize-draw engine

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{InstantGameModel, PrizeTier};
use crate::engine::{EngineError, SlotEngine, model_state, validate_request};
use crate::spin::{SpinOutcome, SpinRequest};

/// Draws one prize tier per spin; the tier pays `multiplier × total bet`
pub struct InstantWinEngine {
    model: InstantGameModel,
    rng: ChaCha8Rng,
}

impl InstantWinEngine {
    pub fn new(model: InstantGameModel, seed: Option<u64>) -> Result<Self, EngineError> {
        if model.total_weight() == 0 {
            return Err(EngineError::InvalidState(format!("{}: prize weights sum to zero", model.id)));
        }
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self { model, rng })
    }

    fn draw_tier(&mut self) -> Result<&PrizeTier, EngineError> {
        let total = self.model.total_weight();
        if total == 0 {
            return Err(EngineError::InvalidState("prize weights sum to zero".into()));
        }
        let mut ticket = self.rng.random_range(0..total);
        for tier in &self.model.tiers {
            let weight = tier.weight as u64;
            if ticket < weight {
                return Ok(tier);
            }
            ticket -= weight;
        }
        Err(EngineError::InvalidState("prize draw fell outside the table".into()))
    }
}

impl SlotEngine for InstantWinEngine {
    fn id(&self) -> &str {
        &self.model.id
    }

    fn serialized_state(&self) -> String {
        model_state(&self.model.id, &self.model)
    }

    fn spin(&mut self, request: &SpinRequest) -> Result<SpinOutcome, EngineError> {
        validate_request(request, self.model.max_lines)?;

        let total_bet = request.total_bet_amount();
        let multiplier = self.draw_tier()?.multiplier;

        Ok(SpinOutcome::new(multiplier.saturating_mul(total_bet), total_bet))
    }
}
