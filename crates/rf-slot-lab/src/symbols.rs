//! Symbol definitions and reel strips

use serde::{Deserialize, Serialize};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolType {
    /// Regular paying symbol
    Regular = 0,
    /// Wild - substitutes for regular symbols on a payline
    Wild = 1,
    /// Blank/empty position, never pays
    Blank = 2,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique symbol ID
    pub id: u32,
    /// Symbol name (e.g., "HP1", "LP3", "WILD")
    pub name: String,
    /// Symbol type
    pub symbol_type: SymbolType,
    /// Line pay multipliers of the bet per line, indexed by match count - 3
    pub pays: Vec<i64>,
}

impl Symbol {
    /// Create a regular symbol
    pub fn regular(id: u32, name: impl Into<String>, pays: &[i64]) -> Self {
        Self {
            id,
            name: name.into(),
            symbol_type: SymbolType::Regular,
            pays: pays.to_vec(),
        }
    }

    /// Create a wild symbol with its own line pays
    pub fn wild(id: u32, name: impl Into<String>, pays: &[i64]) -> Self {
        Self {
            id,
            name: name.into(),
            symbol_type: SymbolType::Wild,
            pays: pays.to_vec(),
        }
    }

    /// Create a blank symbol
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            name: "BLANK".to_string(),
            symbol_type: SymbolType::Blank,
            pays: Vec::new(),
        }
    }

    /// Pay multiplier for a match count (0 below three of a kind)
    pub fn pay_for(&self, match_count: usize) -> i64 {
        if match_count < 3 {
            return 0;
        }
        self.pays.get(match_count - 3).copied().unwrap_or(0)
    }

    pub fn is_wild(&self) -> bool {
        self.symbol_type == SymbolType::Wild
    }
}

/// A virtual reel strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbol IDs in order
    pub symbols: Vec<u32>,
}

impl ReelStrip {
    pub fn new(symbols: Vec<u32>) -> Self {
        Self { symbols }
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Option<u32> {
        if self.symbols.is_empty() {
            return None;
        }
        Some(self.symbols[position % self.symbols.len()])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Build a strip by repeating each symbol ID `weight` times, interleaved
/// round-robin so equal symbols do not cluster.
pub fn weighted_strip(weights: &[(u32, usize)]) -> ReelStrip {
    let mut remaining: Vec<(u32, usize)> = weights.to_vec();
    let total: usize = weights.iter().map(|(_, w)| w).sum();
    let mut symbols = Vec::with_capacity(total);

    while symbols.len() < total {
        for (id, left) in remaining.iter_mut() {
            if *left > 0 {
                symbols.push(*id);
                *left -= 1;
            }
        }
    }

    ReelStrip::new(symbols)
}
