use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_sim::random::SimRng;
use station_sim::sim::{Simulation, SimulationConfig};

/// Optional path to a JSON config file.
const CONFIG_ENV: &str = "STATION_SIM_CONFIG";

/// Optional seed overriding the config's.
const SEED_ENV: &str = "STATION_SIM_SEED";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut json = false;
    let mut ticks = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            let n = arg
                .parse::<u32>()
                .map_err(|e| format!("invalid tick count {arg:?}: {e}"))?;
            ticks = Some(n);
        }
    }

    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(%path, "loading config");
            SimulationConfig::from_file(&path)?
        }
        Err(_) => SimulationConfig::default(),
    };

    if let Ok(seed) = std::env::var(SEED_ENV) {
        let seed = seed
            .parse()
            .map_err(|e| format!("invalid {SEED_ENV} {seed:?}: {e}"))?;
        config.seed = Some(seed);
    }
    let ticks = ticks.unwrap_or(config.ticks);

    let rng = config
        .seed
        .map_or_else(SimRng::from_entropy, SimRng::from_seed_u64);
    let mut sim = Simulation::from_config(&config, rng)?;

    info!(
        tracks = config.track_count,
        trains = sim.trains().len(),
        ticks,
        seed = ?config.seed,
        "starting simulation"
    );

    let mut step = 0;
    sim.tick_with(ticks, |event| {
        step += 1;
        info!("[{step}] {event}");
    })?;

    let status = sim.status();
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{status}");
    }

    Ok(())
}
