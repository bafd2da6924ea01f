//! Paytable and win calculation

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolType};

/// A payline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payline {
    /// Row positions for each reel (e.g., [1, 0, 0, 0, 1] for a "V" shape)
    pub positions: Vec<u8>,
}

impl Payline {
    pub fn new(positions: &[u8]) -> Self {
        Self {
            positions: positions.to_vec(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(row: u8, reel_count: u8) -> Self {
        Self {
            positions: vec![row; reel_count as usize],
        }
    }
}

/// Standard payline patterns for a 5×3 grid
pub fn standard_20_paylines() -> Vec<Payline> {
    vec![
        // Straight lines
        Payline::straight(1, 5),
        Payline::straight(0, 5),
        Payline::straight(2, 5),
        // V shapes
        Payline::new(&[0, 1, 2, 1, 0]),
        Payline::new(&[2, 1, 0, 1, 2]),
        // Zigzag
        Payline::new(&[0, 0, 1, 2, 2]),
        Payline::new(&[2, 2, 1, 0, 0]),
        Payline::new(&[1, 0, 0, 0, 1]),
        Payline::new(&[1, 2, 2, 2, 1]),
        // W shapes
        Payline::new(&[0, 1, 0, 1, 0]),
        Payline::new(&[2, 1, 2, 1, 2]),
        Payline::new(&[0, 1, 1, 1, 0]),
        Payline::new(&[2, 1, 1, 1, 2]),
        // Steps
        Payline::new(&[1, 1, 0, 1, 1]),
        Payline::new(&[1, 1, 2, 1, 1]),
        Payline::new(&[0, 2, 0, 2, 0]),
        Payline::new(&[2, 0, 2, 0, 2]),
        Payline::new(&[1, 0, 1, 0, 1]),
        Payline::new(&[1, 2, 1, 2, 1]),
        Payline::new(&[0, 0, 2, 0, 0]),
    ]
}

/// Classic 3×3 layout: three rows plus both diagonals
pub fn classic_5_paylines() -> Vec<Payline> {
    vec![
        Payline::straight(1, 3),
        Payline::straight(0, 3),
        Payline::straight(2, 3),
        Payline::new(&[0, 1, 2]),
        Payline::new(&[2, 1, 0]),
    ]
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    pub line_index: usize,
    pub symbol_id: u32,
    pub match_count: usize,
    /// Bet per line × pay multiplier
    pub win_amount: i64,
}

/// Result of evaluating one grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub line_wins: Vec<LineWin>,
    pub total_win: i64,
}

/// Complete paytable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayTable {
    /// Symbol definitions
    pub symbols: Vec<Symbol>,
    /// Payline definitions
    pub paylines: Vec<Payline>,
}

impl PayTable {
    pub fn new(symbols: Vec<Symbol>, paylines: Vec<Payline>) -> Self {
        Self { symbols, paylines }
    }

    /// Get symbol by ID
    pub fn symbol(&self, id: u32) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// Evaluate the first `lines` paylines of a grid (`grid[reel][row]`).
    ///
    /// Lines pay left to right. Wilds substitute for regular symbols; a run of
    /// leading wilds pays the better of the wild pay and the substituted pay.
    /// A position holding an unknown symbol ends the line there.
    pub fn evaluate(&self, grid: &[Vec<u32>], lines: usize, bet_per_line: i64) -> EvaluationResult {
        let mut result = EvaluationResult::default();

        for (line_index, payline) in self.paylines.iter().take(lines).enumerate() {
            let line_symbols: Vec<&Symbol> = payline
                .positions
                .iter()
                .enumerate()
                .map_while(|(reel, &row)| {
                    grid.get(reel)
                        .and_then(|column| column.get(row as usize))
                        .and_then(|&id| self.symbol(id))
                })
                .collect();

            if let Some(win) = self.evaluate_line(&line_symbols, bet_per_line) {
                result.total_win = result.total_win.saturating_add(win.win_amount);
                result.line_wins.push(LineWin { line_index, ..win });
            }
        }

        result
    }

    fn evaluate_line(&self, line: &[&Symbol], bet_per_line: i64) -> Option<LineWin> {
        let leading_wilds = line.iter().take_while(|s| s.is_wild()).count();
        let anchor = line
            .get(leading_wilds)
            .filter(|s| s.symbol_type == SymbolType::Regular);

        let wild_pay = line
            .first()
            .filter(|s| s.is_wild())
            .map(|wild| (wild.id, leading_wilds, wild.pay_for(leading_wilds)));

        let anchor_pay = anchor.map(|symbol| {
            let count = line
                .iter()
                .take_while(|s| s.is_wild() || s.id == symbol.id)
                .count();
            (symbol.id, count, symbol.pay_for(count))
        });

        let best = match (wild_pay, anchor_pay) {
            (Some(w), Some(a)) => Some(if w.2 >= a.2 { w } else { a }),
            (w, a) => w.or(a),
        };

        best.filter(|(_, _, pay)| *pay > 0)
            .map(|(symbol_id, match_count, pay)| LineWin {
                line_index: 0,
                symbol_id,
                match_count,
                win_amount: pay.saturating_mul(bet_per_line),
            })
    }
}
