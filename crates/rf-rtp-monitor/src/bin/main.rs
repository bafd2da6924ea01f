//! rtp-monitor: verify the realized RTP of the registered slot engines

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rf_rtp_monitor::{GamesConfig, Monitor, MonitorConfig, MonitorError};

#[derive(Parser)]
#[command(name = "rtp-monitor")]
#[command(version, about = "Statistical RTP verification for slot engines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Game parameter file (JSON, or YAML by extension)
    #[arg(long, default_value = "configuration.json")]
    config: PathBuf,

    /// Spin attempts per verification run
    #[arg(long, default_value_t = 100_000)]
    spins: u32,

    /// Engine snapshot directory
    #[arg(long, default_value = "gdkSnapshots")]
    snapshot_dir: PathBuf,

    /// Append-only result log
    #[arg(long, default_value = "rtp.out")]
    result_log: PathBuf,

    /// Seed the engines for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every registered engine (default)
    All,
    /// Verify one engine several times with its configured parameters
    Repeat {
        engine: String,
        #[arg(short, long, default_value_t = 1)]
        times: u32,
    },
    /// Verify one engine once with explicit parameters
    Once {
        engine: String,
        #[arg(short, long, allow_negative_numbers = true)]
        lines: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        bet: i64,
    },
    /// List registered engines with their resolved parameters
    List,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let registry = match rf_slot_lab::builtin_registry(cli.seed) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Engines could not be initialized: {}", e);
            log::error!("Engines could not be initialized: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut config = MonitorConfig::default()
        .with_spin_count(cli.spins)
        .with_snapshot_dir(cli.snapshot_dir)
        .with_result_log(cli.result_log);
    match GamesConfig::load(&cli.config) {
        Ok(games) => config = config.with_games(games),
        Err(e) => log::warn!("Configuration {} not loaded, using defaults: {}", cli.config.display(), e),
    }

    let mut monitor = match Monitor::new(registry, config) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("{}! Please check the engine registry.", e);
            return ExitCode::from(1);
        }
    };

    match run(&mut monitor, cli.command.unwrap_or(Commands::All)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            log::error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(monitor: &mut Monitor, command: Commands) -> Result<(), MonitorError> {
    match command {
        Commands::All => {
            let summaries = monitor.verify_all();
            for summary in &summaries {
                println!("{}", summary.summary());
            }
        }
        Commands::Repeat { engine, times } => {
            for summary in monitor.verify_repeated(&engine, times)? {
                println!("{}", summary.summary());
            }
        }
        Commands::Once { engine, lines, bet } => {
            let summary = monitor.verify_with_params(&engine, lines, bet)?;
            println!("{}", summary.summary());
        }
        Commands::List => {
            for engine_id in monitor.registry().engine_ids() {
                let params = monitor.config().resolve(&engine_id);
                println!(
                    "{:<16} lines = {:<4} bet = {:<6}{}",
                    engine_id,
                    params.lines_played,
                    params.bet_per_line,
                    if params.skip_engine { " (skipped)" } else { "" }
                );
            }
        }
    }
    Ok(())
}
