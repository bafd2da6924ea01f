//! Verification configuration and per-engine parameter resolution

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configured game parameters for one engine.
///
/// Fields missing from a present entry fall back to zero/false, not to the
/// resolver defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameParams {
    pub lines: i32,
    pub bet: i64,
    pub skip_engine: bool,
}

impl GameParams {
    pub fn new(lines: i32, bet: i64, skip_engine: bool) -> Self {
        Self {
            lines,
            bet,
            skip_engine,
        }
    }
}

/// Engine ID → game parameters, as loaded from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamesConfig {
    #[serde(default)]
    pub games: HashMap<String, GameParams>,
}

impl GamesConfig {
    /// Load from a JSON file, or YAML when the extension is `.yaml`/`.yml`
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let config: GamesConfig = if is_yaml {
            serde_yml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };

        log::info!("Loaded {} game entries from {}", config.games.len(), path.display());
        Ok(config)
    }

    /// Builder: add or replace one entry
    pub fn with_game(mut self, engine_id: impl Into<String>, params: GameParams) -> Self {
        self.games.insert(engine_id.into(), params);
        self
    }

    pub fn get(&self, engine_id: &str) -> Option<&GameParams> {
        self.games.get(engine_id)
    }
}

/// Parameters one verification run is played with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParameters {
    pub lines_played: i32,
    pub bet_per_line: i64,
    pub skip_engine: bool,
}

impl EngineParameters {
    /// Explicit parameters; never skipped
    pub fn explicit(lines_played: i32, bet_per_line: i64) -> Self {
        Self {
            lines_played,
            bet_per_line,
            skip_engine: false,
        }
    }
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            lines_played: 1,
            bet_per_line: 1,
            skip_engine: false,
        }
    }
}

impl From<&GameParams> for EngineParameters {
    fn from(params: &GameParams) -> Self {
        Self {
            lines_played: params.lines,
            bet_per_line: params.bet,
            skip_engine: params.skip_engine,
        }
    }
}

/// Resolve the parameters for `engine_id`.
///
/// A configured entry is used verbatim, with no range checks; an absent entry
/// (or no configuration at all) yields the defaults.
pub fn resolve(engine_id: &str, games: Option<&GamesConfig>) -> EngineParameters {
    match games.and_then(|g| g.get(engine_id)) {
        Some(params) => EngineParameters::from(params),
        None => {
            log::debug!("{}: no configured parameters, using defaults", engine_id);
            EngineParameters::default()
        }
    }
}

/// Configuration for a verification session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Spin attempts per verification run
    pub spin_count: u32,

    /// Directory holding engine snapshots
    pub snapshot_dir: PathBuf,

    /// Append-only result log
    pub result_log: PathBuf,

    /// Per-engine game parameters (None = nothing loaded)
    pub games: Option<GamesConfig>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            spin_count: 100_000,
            snapshot_dir: PathBuf::from("gdkSnapshots"),
            result_log: PathBuf::from("rtp.out"),
            games: None,
        }
    }
}

impl MonitorConfig {
    /// Builder: set spin budget
    pub fn with_spin_count(mut self, spin_count: u32) -> Self {
        self.spin_count = spin_count;
        self
    }

    /// Builder: set snapshot directory
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    /// Builder: set result log path
    pub fn with_result_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_log = path.into();
        self
    }

    /// Builder: set game parameters
    pub fn with_games(mut self, games: GamesConfig) -> Self {
        self.games = Some(games);
        self
    }

    /// Parameters for `engine_id` under this configuration
    pub fn resolve(&self, engine_id: &str) -> EngineParameters {
        resolve(engine_id, self.games.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_engine_resolves_verbatim() {
        let games = GamesConfig::default()
            .with_game("lucky7", GameParams::new(20, 5, false))
            .with_game("retired", GameParams::new(9, 2, true));

        assert_eq!(resolve("lucky7", Some(&games)), EngineParameters::explicit(20, 5));
        let retired = resolve("retired", Some(&games));
        assert_eq!((retired.lines_played, retired.bet_per_line), (9, 2));
        assert!(retired.skip_engine);
    }

    #[test]
    fn test_absent_engine_gets_defaults() {
        let games = GamesConfig::default().with_game("lucky7", GameParams::new(20, 5, false));
        let expected = EngineParameters {
            lines_played: 1,
            bet_per_line: 1,
            skip_engine: false,
        };
        assert_eq!(resolve("ghost", Some(&games)), expected);
        assert_eq!(resolve("ghost", None), expected);
    }

    #[test]
    fn test_degenerate_values_are_kept() {
        let games = GamesConfig::default().with_game("odd", GameParams::new(0, -3, false));
        let params = resolve("odd", Some(&games));
        assert_eq!(params.lines_played, 0);
        assert_eq!(params.bet_per_line, -3);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"games": {"lucky7": {"lines": 20, "bet": 5, "skipEngine": true}, "partial": {"lines": 3}}}"#;
        let games: GamesConfig = serde_json::from_str(json).unwrap();
        assert_eq!(games.get("lucky7"), Some(&GameParams::new(20, 5, true)));
        assert_eq!(games.get("partial"), Some(&GameParams::new(3, 0, false)));
    }

    #[test]
    fn test_load_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("configuration.yaml");
        std::fs::write(&yaml_path, "games:\n  lucky7:\n    lines: 20\n    bet: 5\n    skipEngine: false\n").unwrap();
        let games = GamesConfig::load(&yaml_path).unwrap();
        assert_eq!(games.get("lucky7"), Some(&GameParams::new(20, 5, false)));

        let json_path = dir.path().join("configuration.json");
        std::fs::write(&json_path, "{ not json").unwrap();
        assert!(matches!(GamesConfig::load(&json_path), Err(crate::MonitorError::Json(_))));

        assert!(matches!(
            GamesConfig::load(&dir.path().join("missing.json")),
            Err(crate::MonitorError::Io(_))
        ));
    }

    #[test]
    fn test_monitor_config_builder() {
        let config = MonitorConfig::default()
            .with_spin_count(500)
            .with_snapshot_dir("snaps")
            .with_result_log("out.log");
        assert_eq!(config.spin_count, 500);
        assert_eq!(config.snapshot_dir, PathBuf::from("snaps"));
        assert_eq!(config.result_log, PathBuf::from("out.log"));
        assert_eq!(config.resolve("any"), EngineParameters::default());
        assert_eq!(MonitorConfig::default().spin_count, 100_000);
    }
}
