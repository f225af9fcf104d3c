use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::*;
use tracing_subscriber::EnvFilter;

mod actuators;
mod config;
mod hmi;
mod runtime;
mod sensors;
mod status;

use actuators::RelayBank;
use config::Config;
use runtime::Controller;
use sensors::SimulatedPlant;
use status::LogIndicator;

// How often the loop wakes to poll the HMI channel between cycles
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Bind the log facade; RUST_LOG selects the filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::read()?;
    info!("Thresholds: {:?}", config.thresholds);

    let plant = SimulatedPlant::new(config.sim_ambient_f, config.sim_humidity_pct);
    let mut controller = Controller::new(
        config.thresholds,
        plant,
        RelayBank::new(),
        LogIndicator::new(),
    );

    let commands = hmi::spawn_command_reader(io::BufReader::new(io::stdin()));
    let mut hmi_out = io::stdout();

    // Monotonic time base for the dwell timer
    let started = Instant::now();
    let mut next_cycle = Instant::now();

    loop {
        while let Ok(command) = commands.try_recv() {
            controller.handle_command(command);
        }

        if Instant::now() >= next_cycle {
            let now_ms = started.elapsed().as_millis() as u64;
            let snapshot = controller.tick(now_ms)?;
            hmi::write_snapshot(&mut hmi_out, &snapshot)?;
            next_cycle += config.cycle_interval;
        }

        thread::sleep(POLL_INTERVAL);
    }
}
