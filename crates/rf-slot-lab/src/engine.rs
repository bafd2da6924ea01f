//! Engine capability contract

use crate::spin::{SpinOutcome, SpinRequest};

/// Errors an engine may raise while spinning
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid spin request: {0}")]
    InvalidRequest(String),

    #[error("Invalid engine state: {0}")]
    InvalidState(String),
}

/// A payout engine.
///
/// Engines are driven strictly sequentially: `spin` takes `&mut self` and no
/// engine is required to be reentrant.
pub trait SlotEngine {
    /// Stable engine identifier
    fn id(&self) -> &str;

    /// Full serialized representation of the engine's model, used for change
    /// detection between runs. Must be deterministic for an unchanged engine.
    fn serialized_state(&self) -> String;

    /// Play one spin
    fn spin(&mut self, request: &SpinRequest) -> Result<SpinOutcome, EngineError>;
}

/// Common request validation for line-based engines
pub(crate) fn validate_request(request: &SpinRequest, max_lines: usize) -> Result<(), EngineError> {
    if request.lines_played < 1 || request.lines_played as usize > max_lines {
        return Err(EngineError::InvalidRequest(format!(
            "lines played {} outside 1..={}",
            request.lines_played, max_lines
        )));
    }
    if request.bet_per_line < 1 {
        return Err(EngineError::InvalidRequest(format!(
            "bet per line {} below 1",
            request.bet_per_line
        )));
    }
    Ok(())
}

/// Serialize a model for snapshotting, pretty-printed so diffs stay readable
pub(crate) fn model_state<T: serde::Serialize>(id: &str, model: &T) -> String {
    match serde_json::to_string_pretty(model) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Engine {} state could not be serialized: {}", id, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request() {
        assert!(validate_request(&SpinRequest::new(5, 1), 5).is_ok());
        assert!(validate_request(&SpinRequest::new(0, 1), 5).is_err());
        assert!(validate_request(&SpinRequest::new(6, 1), 5).is_err());
        assert!(validate_request(&SpinRequest::new(-3, 1), 5).is_err());
        assert!(matches!(
            validate_request(&SpinRequest::new(1, 0), 5),
            Err(EngineError::InvalidRequest(_))
        ));
    }
}
