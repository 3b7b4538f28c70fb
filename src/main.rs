/* 3rd party libraries */
use clap::Parser;
use log::{info, warn};
use std::thread::sleep;
use std::time::Duration;

/* Custom libraries */
use elevator_dispatch::config;
use elevator_dispatch::{Building, Direction, StrategyKind, SystemStatus};
use std::error::Error;

#[derive(Parser)]
#[clap(name = "elevator_dispatch")]
#[clap(about = "Simulated elevator dispatch with SCAN scheduling")]
struct Cli {
    /// Path to the TOML configuration file
    #[clap(long, default_value = "config.toml")]
    config: String,

    /// Override the assignment strategy (nearest or round-robin)
    #[clap(long)]
    strategy: Option<StrategyKind>,

    /// Print status as JSON instead of text
    #[clap(long)]
    json: bool,

    /// Milliseconds between status prints
    #[clap(long, default_value = "500")]
    status_interval: u64,
}

/* Main */
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // Load the configuration
    let mut config = config::load_config(&cli.config)?;
    if let Some(strategy) = cli.strategy {
        config.dispatcher.strategy = strategy;
    }
    info!(
        "Loaded {} with {} elevators, {} strategy",
        cli.config, config.elevator.count, config.dispatcher.strategy
    );

    // Start the cars
    let mut building = Building::new(&config)?;
    print_status(&building.get_status(), cli.json)?;

    // Scripted traffic: hall calls, car calls, and a few requests that must be refused
    let top = config.building.max_floor;
    let bottom = config.building.min_floor;
    let hall_calls = [
        (bottom + (top - bottom) / 2, Direction::Up),
        (bottom + 2, Direction::Down),
        (top - 1, Direction::Down),
        (top + 5, Direction::Up),
    ];
    for (floor, direction) in hall_calls {
        match building.call_elevator(floor, direction) {
            Ok(car) => info!("Floor {} ({}) -> elevator {}", floor, direction, car),
            Err(e) => warn!("Hall call refused: {}", e),
        }
    }

    for (car, floor) in [(1, top), (2, bottom), (99, bottom)] {
        if let Err(e) = building.select_floor(car, floor) {
            warn!("Car call refused: {}", e);
        }
    }

    // Report until every car has served its queue
    loop {
        sleep(Duration::from_millis(cli.status_interval));
        let status = building.get_status();
        print_status(&status, cli.json)?;
        if status.all_idle() {
            break;
        }
    }

    building.shutdown();
    info!("All elevators idle, simulation complete");
    Ok(())
}

fn print_status(status: &SystemStatus, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", status.to_json()?);
    } else {
        println!("{}", status);
    }
    Ok(())
}
