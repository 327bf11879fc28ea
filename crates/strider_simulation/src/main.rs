//! Headless симуляция STRIDER
//!
//! Спавнит персонажа под Autopilot'ом и печатает его состояние.
//! Аргументы: `[seed] [ticks] [config.json]`

use std::env;
use std::fs;

use bevy::prelude::*;
use strider_simulation::{
    character_snapshots, create_headless_app, log_error, spawn_configured_character, Autopilot,
    ControllerConfig, ControllerResult,
};

fn main() {
    if let Err(err) = run() {
        log_error(&format!("Simulation failed: {}", err));
        std::process::exit(1);
    }
}

fn run() -> ControllerResult<()> {
    let args: Vec<String> = env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1000);

    let config = match args.get(3) {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            ControllerConfig::from_json_str(&json)?
        }
        None => ControllerConfig::default(),
    };

    println!("Starting STRIDER headless simulation (seed: {}, ticks: {})", seed, ticks);

    let mut app = create_headless_app(seed);
    app.insert_resource(config);
    let character = spawn_configured_character(app.world_mut(), Vec3::ZERO);
    app.world_mut().entity_mut(character).insert(Autopilot::default());

    for tick in 0..ticks {
        app.update();

        if tick % 60 == 0 {
            for snapshot in character_snapshots(app.world_mut()) {
                println!(
                    "Tick {}: pos ({:.2}, {:.2}, {:.2}) grounded={} speed={:.2} behaviour={:?} override={}",
                    tick,
                    snapshot.translation.x,
                    snapshot.translation.y,
                    snapshot.translation.z,
                    snapshot.grounded,
                    snapshot.speed,
                    snapshot.current_behaviour,
                    snapshot.overriding,
                );
            }
        }
    }

    println!("Simulation complete!");
    Ok(())
}
