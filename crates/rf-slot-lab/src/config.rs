//! Engine model configuration

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::paytable::PayTable;
use crate::symbols::ReelStrip;

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Classic 3×3
    pub fn classic_3x3() -> Self {
        Self { reels: 3, rows: 3 }
    }
}

/// Model of a reel-strip, payline-evaluated game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGameModel {
    pub id: String,
    pub grid: GridSpec,
    /// One strip per reel
    pub strips: Vec<ReelStrip>,
    pub paytable: PayTable,
}

impl LineGameModel {
    /// Check that strips and paylines fit the grid and every strip symbol
    /// is in the paytable
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.strips.len() != self.grid.reels as usize {
            return Err(EngineError::InvalidState(format!(
                "{}: {} strips for {} reels",
                self.id,
                self.strips.len(),
                self.grid.reels
            )));
        }
        if let Some(index) = self.strips.iter().position(ReelStrip::is_empty) {
            return Err(EngineError::InvalidState(format!("{}: reel {} is empty", self.id, index)));
        }
        for (index, strip) in self.strips.iter().enumerate() {
            if let Some(&id) = strip.symbols.iter().find(|&&id| self.paytable.symbol(id).is_none()) {
                return Err(EngineError::InvalidState(format!(
                    "{}: reel {} holds symbol {} missing from the paytable",
                    self.id, index, id
                )));
            }
        }
        if self.paytable.paylines.is_empty() {
            return Err(EngineError::InvalidState(format!("{}: no paylines", self.id)));
        }
        for (index, line) in self.paytable.paylines.iter().enumerate() {
            if line.positions.len() != self.grid.reels as usize
                || line.positions.iter().any(|&row| row >= self.grid.rows)
            {
                return Err(EngineError::InvalidState(format!(
                    "{}: payline {} does not fit a {}x{} grid",
                    self.id, index, self.grid.reels, self.grid.rows
                )));
            }
        }
        Ok(())
    }

    pub fn max_lines(&self) -> usize {
        self.paytable.paylines.len()
    }
}

/// One weighted outcome of an instant-win game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeTier {
    pub name: String,
    /// Relative draw weight
    pub weight: u32,
    /// Win as a multiple of the total bet
    pub multiplier: i64,
}

impl PrizeTier {
    pub fn new(name: impl Into<String>, weight: u32, multiplier: i64) -> Self {
        Self {
            name: name.into(),
            weight,
            multiplier,
        }
    }
}

/// Model of a weighted prize-draw game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantGameModel {
    pub id: String,
    /// Highest accepted lines value
    pub max_lines: usize,
    pub tiers: Vec<PrizeTier>,
}

impl InstantGameModel {
    pub fn total_weight(&self) -> u64 {
        self.tiers.iter().map(|t| t.weight as u64).sum()
    }

    /// Theoretical RTP of the prize table
    pub fn theoretical_rtp(&self) -> f64 {
        let total = self.total_weight();
        if total == 0 {
            return 0.0;
        }
        let expected: f64 = self
            .tiers
            .iter()
            .map(|t| t.weight as f64 * t.multiplier as f64)
            .sum();
        expected / total as f64
    }
}
