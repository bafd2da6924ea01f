//! Reel-strip engine with payline evaluation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::LineGameModel;
use crate::engine::{EngineError, SlotEngine, model_state, validate_request};
use crate::spin::{SpinOutcome, SpinRequest};

/// Classic line slot: random stop per reel, wins evaluated on played lines
pub struct LineSlotEngine {
    model: LineGameModel,
    rng: ChaCha8Rng,
}

impl LineSlotEngine {
    /// Create an engine; `seed` makes the stop sequence reproducible
    pub fn new(model: LineGameModel, seed: Option<u64>) -> Result<Self, EngineError> {
        model.validate()?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self { model, rng })
    }

    /// Draw a visible window, `grid[reel][row]`
    fn draw_grid(&mut self) -> Result<Vec<Vec<u32>>, EngineError> {
        let rows = self.model.grid.rows as usize;
        let mut grid = Vec::with_capacity(self.model.strips.len());

        for (reel, strip) in self.model.strips.iter().enumerate() {
            if strip.is_empty() {
                return Err(EngineError::InvalidState(format!("reel {} has no symbols", reel)));
            }
            let stop = self.rng.random_range(0..strip.len());
            let column = (0..rows)
                .map(|row| {
                    strip.symbol_at(stop + row).ok_or_else(|| {
                        EngineError::InvalidState(format!("reel {} has no symbols", reel))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            grid.push(column);
        }

        Ok(grid)
    }
}

impl SlotEngine for LineSlotEngine {
    fn id(&self) -> &str {
        &self.model.id
    }

    fn serialized_state(&self) -> String {
        model_state(&self.model.id, &self.model)
    }

    fn spin(&mut self, request: &SpinRequest) -> Result<SpinOutcome, EngineError> {
        validate_request(request, self.model.max_lines())?;

        let grid = self.draw_grid()?;
        let evaluation = self.model.paytable.evaluate(
            &grid,
            request.lines_played as usize,
            request.bet_per_line,
        );

        log::trace!(
            "{}: {} line wins, win {}",
            self.model.id,
            evaluation.line_wins.len(),
            evaluation.total_win
        );

        Ok(SpinOutcome::new(evaluation.total_win, request.total_bet_amount()))
    }
}
