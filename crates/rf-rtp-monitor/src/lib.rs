//! # rf-rtp-monitor
//!
//! Statistical verification harness for slot payout engines.
//!
//! Drives every registered engine through a fixed budget of simulated spins,
//! accumulates wins and bets, and records the realized Return-To-Player
//! ratio. Each run first snapshots the engine's serialized state so that a
//! changed engine is noticed between sessions.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rf_rtp_monitor::{Monitor, MonitorConfig};
//!
//! let registry = rf_slot_lab::builtin_registry(None)?;
//! let mut monitor = Monitor::new(registry, MonitorConfig::default().with_spin_count(10_000))?;
//! for summary in monitor.verify_all() {
//!     println!("{}", summary.summary());
//! }
//! ```

pub mod accumulator;
pub mod config;
pub mod monitor;
pub mod report;
pub mod snapshot;
pub mod spin;

pub use accumulator::RunAccumulator;
pub use config::{EngineParameters, GameParams, GamesConfig, MonitorConfig, resolve};
pub use monitor::{Monitor, RunSummary};
pub use report::{ResultLog, RunResult};
pub use snapshot::{SnapshotStatus, SnapshotTracker};
pub use spin::{SpinError, run_spin};

use thiserror::Error;

/// Errors surfaced by a verification session
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("No engines registered")]
    NoEngines,

    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
