mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

use roadtrip_game::GameConfig;

use logic::{NavigationPolicy, SimulationConfig, SimulationSession, aggregate, render_console,
    render_json};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable console summary
    Console,
    /// Pretty-printed JSON report
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "roadtrip-tester", version)]
#[command(about = "Headless playability testing for the Roadtrip game")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of consecutive seeds simulated per listed seed
    #[arg(long, default_value_t = 1)]
    iterations: u64,

    /// Maximum moves before a journey is declared stalled
    #[arg(long, default_value_t = 500)]
    max_moves: u32,

    /// Navigation policy driving the player
    #[arg(long, value_enum, default_value_t = NavigationPolicy::Greedy)]
    policy: NavigationPolicy,

    /// Optional path to a game config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Per-journey output lines in console reports
    #[arg(short, long)]
    verbose: bool,
}

fn split_seeds(input: &str) -> Result<Vec<u64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u64>().with_context(|| format!("invalid seed '{s}'")))
        .collect()
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = GameConfig::from_json(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seeds = split_seeds(&args.seeds)?;
    let cfg = load_config(args.config.as_ref())?;

    let mut records = Vec::new();
    for &base in &seeds {
        for offset in 0..args.iterations.max(1) {
            let seed = base.wrapping_add(offset);
            let sim = SimulationConfig::new(seed, args.policy).with_max_moves(args.max_moves);
            log::info!("running seed {seed} with the {} policy", args.policy.as_str());
            records.push(SimulationSession::new(cfg.clone(), sim).run());
        }
    }

    let summary = aggregate(&records);
    match args.report {
        ReportFormat::Console => render_console(&records, &summary, args.verbose),
        ReportFormat::Json => println!("{}", render_json(&records, &summary)?),
    }
    Ok(())
}
