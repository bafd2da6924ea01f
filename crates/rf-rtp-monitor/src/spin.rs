//! Single simulated spin

use std::panic::{self, AssertUnwindSafe};

use rf_slot_lab::{SlotEngine, SpinOutcome, SpinRequest};
use thiserror::Error;

/// Synthetic player every simulated spin is issued for
pub const SIMULATION_USER: &str = "testUser";

/// Failure of one spin attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpinError {
    #[error("Engine fault: {0}")]
    EngineFault(String),
}

/// Build the request the harness sends for every spin
pub fn simulation_request(lines_played: i32, bet_per_line: i64) -> SpinRequest {
    SpinRequest::new(lines_played, bet_per_line)
        .with_user(SIMULATION_USER)
        .with_context(1, 1, 1, 1)
}

/// Issue one spin.
///
/// Errors returned by the engine and panics unwinding out of it are both
/// reported as [`SpinError::EngineFault`].
pub fn run_spin(
    engine: &mut dyn SlotEngine,
    lines_played: i32,
    bet_per_line: i64,
) -> Result<SpinOutcome, SpinError> {
    let request = simulation_request(lines_played, bet_per_line);

    match panic::catch_unwind(AssertUnwindSafe(|| engine.spin(&request))) {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(e)) => Err(SpinError::EngineFault(e.to_string())),
        Err(panic_info) => {
            let description = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(SpinError::EngineFault(format!("engine panicked: {}", description)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_slot_lab::EngineError;

    struct Scripted {
        last_request: Option<SpinRequest>,
        mode: u8,
    }

    impl SlotEngine for Scripted {
        fn id(&self) -> &str {
            "scripted"
        }

        fn serialized_state(&self) -> String {
            String::new()
        }

        fn spin(&mut self, request: &SpinRequest) -> Result<SpinOutcome, EngineError> {
            self.last_request = Some(request.clone());
            match self.mode {
                0 => Ok(SpinOutcome::new(3, request.total_bet_amount())),
                1 => Err(EngineError::InvalidState("reels jammed".into())),
                _ => panic!("paytable index out of range"),
            }
        }
    }

    #[test]
    fn test_request_fields() {
        let mut engine = Scripted { last_request: None, mode: 0 };
        let outcome = run_spin(&mut engine, 20, 5).unwrap();
        assert_eq!(outcome, SpinOutcome::new(3, 100));

        let request = engine.last_request.unwrap();
        assert_eq!(request.lines_played, 20);
        assert_eq!(request.bet_per_line, 5);
        assert!(!request.is_free_spin);
        assert_eq!(request.user_id, SIMULATION_USER);
        assert_eq!(
            (request.session_id, request.round_id, request.operator_id, request.platform_id),
            (1, 1, 1, 1)
        );
    }

    #[test]
    fn test_engine_error_becomes_fault() {
        let mut engine = Scripted { last_request: None, mode: 1 };
        let err = run_spin(&mut engine, 1, 1).unwrap_err();
        assert_eq!(err, SpinError::EngineFault("Invalid engine state: reels jammed".into()));
    }

    #[test]
    fn test_engine_panic_becomes_fault() {
        let mut engine = Scripted { last_request: None, mode: 2 };
        match run_spin(&mut engine, 1, 1) {
            Err(SpinError::EngineFault(msg)) => assert!(msg.contains("paytable index out of range")),
            other => panic!("expected fault, got {:?}", other),
        }
    }
}
