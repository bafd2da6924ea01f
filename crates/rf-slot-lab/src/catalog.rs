//! Built-in engine catalogue

use crate::config::{GridSpec, InstantGameModel, LineGameModel, PrizeTier};
use crate::engine::EngineError;
use crate::instant::InstantWinEngine;
use crate::line::LineSlotEngine;
use crate::paytable::{PayTable, classic_5_paylines, standard_20_paylines};
use crate::registry::EngineRegistry;
use crate::symbols::{Symbol, weighted_strip};

const WILD: u32 = 10;
const BLANK: u32 = 0;

/// 5×3, 20 lines, wild on reels 2-5
pub fn classic_5x3_model() -> LineGameModel {
    let symbols = vec![
        Symbol::regular(1, "HP1", &[20, 100, 500]),
        Symbol::regular(2, "HP2", &[15, 75, 300]),
        Symbol::regular(3, "HP3", &[10, 50, 200]),
        Symbol::regular(4, "LP1", &[5, 25, 100]),
        Symbol::regular(5, "LP2", &[4, 20, 80]),
        Symbol::regular(6, "LP3", &[3, 15, 60]),
        Symbol::regular(7, "LP4", &[2, 10, 40]),
        Symbol::wild(WILD, "WILD", &[50, 200, 1000]),
    ];

    let base: [(u32, usize); 7] = [(1, 2), (2, 3), (3, 4), (4, 6), (5, 7), (6, 8), (7, 9)];
    let strips = (0..5)
        .map(|reel| {
            let mut weights = base.to_vec();
            if reel > 0 {
                weights.push((WILD, 1));
            }
            weighted_strip(&weights)
        })
        .collect();

    LineGameModel {
        id: "classic5x3".into(),
        grid: GridSpec::standard_5x3(),
        strips,
        paytable: PayTable::new(symbols, standard_20_paylines()),
    }
}

/// 3×3 fruit machine, 5 lines, blanks between symbols
pub fn lucky7_model() -> LineGameModel {
    let symbols = vec![
        Symbol::regular(7, "SEVEN", &[100]),
        Symbol::regular(3, "BAR", &[20]),
        Symbol::regular(2, "BELL", &[10]),
        Symbol::regular(1, "CHERRY", &[4]),
        Symbol::blank(BLANK),
    ];
    let strip = weighted_strip(&[(BLANK, 12), (1, 6), (2, 4), (3, 3), (7, 1)]);

    LineGameModel {
        id: "lucky7".into(),
        grid: GridSpec::classic_3x3(),
        strips: vec![strip; 3],
        paytable: PayTable::new(symbols, classic_5_paylines()),
    }
}

/// Prize draw with a 94% theoretical return
pub fn goldrush_model() -> InstantGameModel {
    InstantGameModel {
        id: "goldrush".into(),
        max_lines: 10,
        tiers: vec![
            PrizeTier::new("no win", 6_776, 0),
            PrizeTier::new("refund", 2_000, 1),
            PrizeTier::new("silver", 1_000, 3),
            PrizeTier::new("gold", 200, 10),
            PrizeTier::new("nugget", 24, 100),
        ],
    }
}

/// Registry holding every built-in engine.
///
/// With a seed, each engine gets its own seed derived from it so runs are
/// reproducible end to end.
pub fn builtin_registry(seed: Option<u64>) -> Result<EngineRegistry, EngineError> {
    let derive = |offset: u64| seed.map(|s| s.wrapping_add(offset));

    let registry = EngineRegistry::new()
        .with_engine(Box::new(LineSlotEngine::new(classic_5x3_model(), derive(0))?))
        .with_engine(Box::new(LineSlotEngine::new(lucky7_model(), derive(1))?))
        .with_engine(Box::new(InstantWinEngine::new(goldrush_model(), derive(2))?));

    log::debug!("Built-in registry: {:?}", registry.engine_ids());
    Ok(registry)
}
