//! # rf-slot-lab
//!
//! Engine-side half of the RTP verification tooling: the contract every payout
//! engine implements, the registry a verification session is handed, and the
//! engines shipped with the workspace.
//!
//! ## Architecture
//!
//! ```text
//! EngineRegistry
//!     │
//!     ├── LineSlotEngine   (reel strips + paylines)
//!     └── InstantWinEngine (weighted prize tiers)
//!           │
//!           v
//!     SlotEngine::spin(SpinRequest) → SpinOutcome
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod instant;
pub mod line;
pub mod paytable;
pub mod registry;
pub mod spin;
pub mod symbols;

pub use catalog::builtin_registry;
pub use config::*;
pub use engine::{EngineError, SlotEngine};
pub use instant::InstantWinEngine;
pub use line::LineSlotEngine;
pub use paytable::*;
pub use registry::EngineRegistry;
pub use spin::*;
pub use symbols::*;
