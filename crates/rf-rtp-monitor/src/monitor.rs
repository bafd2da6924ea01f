//! Verification orchestrator

use chrono::{Local, NaiveDateTime};
use rf_slot_lab::EngineRegistry;
use serde::{Deserialize, Serialize};

use crate::accumulator::RunAccumulator;
use crate::config::{EngineParameters, MonitorConfig};
use crate::report::{ResultLog, RunResult};
use crate::snapshot::SnapshotTracker;
use crate::spin::run_spin;
use crate::{MonitorError, Result};

const CONSOLE_TIME_FORMAT: &str = "%H:%M:%S";

/// What one verification run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub engine_id: String,
    pub params: EngineParameters,
    /// Spin attempts made (always the configured budget)
    pub attempts: u32,
    /// Attempts that ended in an engine fault
    pub faults: u32,
    pub accumulator: RunAccumulator,
    pub rtp: f32,
    pub snapshot_changed: bool,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} - RTP {:.6} over {} spins ({} faults) [lines = {}, bet = {}]{}",
            self.engine_id,
            self.rtp,
            self.attempts,
            self.faults,
            self.params.lines_played,
            self.params.bet_per_line,
            if self.snapshot_changed { " engine changed" } else { "" }
        )
    }
}

/// Drives registered engines through verification runs.
///
/// Engines are verified one at a time and spins are issued strictly in
/// sequence against a single accumulator.
pub struct Monitor {
    registry: EngineRegistry,
    config: MonitorConfig,
    snapshots: SnapshotTracker,
    results: ResultLog,
}

impl Monitor {
    /// Fails with [`MonitorError::NoEngines`] when the registry is empty
    pub fn new(registry: EngineRegistry, config: MonitorConfig) -> Result<Self> {
        if registry.is_empty() {
            log::error!("Engines were not initialized");
            return Err(MonitorError::NoEngines);
        }

        log::info!(
            "Monitoring {} engines (bundle {}, {} spins per run)",
            registry.len(),
            registry.bundle_version(),
            config.spin_count
        );

        Ok(Self {
            snapshots: SnapshotTracker::new(config.snapshot_dir.clone()),
            results: ResultLog::new(config.result_log.clone()),
            registry,
            config,
        })
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Verify every registered engine with its configured or default
    /// parameters, leaving out engines configured with `skipEngine`
    pub fn verify_all(&mut self) -> Vec<RunSummary> {
        let mut summaries = Vec::new();

        for engine_id in self.registry.engine_ids() {
            let params = self.config.resolve(&engine_id);
            if params.skip_engine {
                log::info!("{}: skipped by configuration", engine_id);
                continue;
            }
            match self.verify_engine(&engine_id, params) {
                Ok(summary) => summaries.push(summary),
                Err(e) => log::error!("{}: verification failed: {}", engine_id, e),
            }
        }

        summaries
    }

    /// Verify one engine `times` times with its configured or default
    /// parameters; `skipEngine` is not consulted
    pub fn verify_repeated(&mut self, engine_id: &str, times: u32) -> Result<Vec<RunSummary>> {
        self.ensure_registered(engine_id)?;
        let params = self.config.resolve(engine_id);

        (0..times)
            .map(|_| self.verify_engine(engine_id, params))
            .collect()
    }

    /// Verify one engine once with explicit parameters, ignoring configuration
    pub fn verify_with_params(&mut self, engine_id: &str, lines_played: i32, bet_per_line: i64) -> Result<RunSummary> {
        self.ensure_registered(engine_id)?;
        self.verify_engine(engine_id, EngineParameters::explicit(lines_played, bet_per_line))
    }

    /// One full run: snapshot, spin loop, finalize, report
    pub fn verify_engine(&mut self, engine_id: &str, params: EngineParameters) -> Result<RunSummary> {
        let engine = self
            .registry
            .engine_mut(engine_id)
            .ok_or_else(|| MonitorError::UnknownEngine(engine_id.to_string()))?;

        let budget = self.config.spin_count;
        let started = Local::now();
        println!(
            "{} Start simulation: {} [lines = {}, bet = {}, {} spins]",
            started.format(CONSOLE_TIME_FORMAT),
            engine_id,
            params.lines_played,
            params.bet_per_line,
            budget
        );

        let snapshot = self.snapshots.check_and_persist(engine_id, &engine.serialized_state());
        if snapshot.changed {
            eprintln!("Engine is changed!");
        }

        let mut accumulator = RunAccumulator::new(engine_id);
        let mut faults = 0u32;

        for iteration in 0..budget {
            match run_spin(&mut *engine, params.lines_played, params.bet_per_line) {
                Ok(outcome) => accumulator.accumulate(&outcome),
                Err(e) => {
                    faults += 1;
                    log::error!("{}: spin {} failed: {}", engine_id, iteration, e);
                    eprintln!("{}", e);
                    eprintln!("Trying to continue simulation...");
                }
            }
        }

        let rtp = accumulator.finalize();
        if !accumulator.has_stake() {
            log::warn!("{}: no stake accumulated, RTP is undefined", engine_id);
        }

        let finished = Local::now();
        let record = RunResult {
            timestamp: finished.naive_local(),
            engine_id: engine_id.to_string(),
            lines_played: params.lines_played,
            bet_per_line: params.bet_per_line,
            rtp,
            spin_count: budget,
            bundle_version: self.registry.bundle_version().to_string(),
            checksum: self.registry.last_checksum().to_string(),
        };
        if let Err(e) = self.results.append(&record) {
            log::error!("Error during saving RTP: {}", e);
        }

        println!(
            "{} Simulation finished: {}. RTP = {:.6}",
            finished.format(CONSOLE_TIME_FORMAT),
            engine_id,
            rtp
        );

        Ok(RunSummary {
            engine_id: engine_id.to_string(),
            params,
            attempts: budget,
            faults,
            accumulator,
            rtp,
            snapshot_changed: snapshot.changed,
            started_at: started.naive_local(),
            finished_at: finished.naive_local(),
        })
    }

    fn ensure_registered(&self, engine_id: &str) -> Result<()> {
        if self.registry.contains(engine_id) {
            Ok(())
        } else {
            Err(MonitorError::UnknownEngine(engine_id.to_string()))
        }
    }
}
