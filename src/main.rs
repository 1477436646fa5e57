use orbitsim::{Scenario, SimulationConfig, RunMode};
use orbitsim::{run_live, run_still};
use orbitsim::bench_advance;

use anyhow::{bail, Context, Result};
use bevy::app::AppExit;
use clap::Parser;
use tracing::info;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, taken as-is if it exists, otherwise looked up in scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run the configured step count without opening a window
    #[arg(long)]
    headless: bool,

    /// Override run.steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override scene.seed
    #[arg(long)]
    seed: Option<u64>,

    /// Time the integrator and exit
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// load here to keep main clean
fn load_config(file_name: &str) -> Result<SimulationConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    info!(path = %config_path.display(), "loading scenario");
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    SimulationConfig::from_yaml_str(&text)
        .with_context(|| format!("invalid scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_advance()?;
        return Ok(());
    }

    let mut cfg = load_config(&args.file_name)?;
    if let Some(steps) = args.steps {
        cfg.run.steps = steps;
    }
    if args.seed.is_some() {
        cfg.scene.seed = args.seed;
    }

    let mut scenario = Scenario::build_scenario(cfg)?;

    if args.headless {
        scenario.run_batch()?;
        if let Some(b) = scenario.system.anchor_body() {
            info!(x = b.x.x, y = b.x.y, vx = b.v.x, vy = b.v.y, "anchor final state");
        }
        return Ok(());
    }

    let exit = match scenario.engine.mode {
        RunMode::Live => run_live(scenario),
        RunMode::Batch => {
            scenario.run_batch()?;
            run_still(scenario)
        }
    };

    if let AppExit::Error(code) = exit {
        bail!("viewer exited with code {code}");
    }
    Ok(())
}
