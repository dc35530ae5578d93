use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use bevy_ecs::prelude::*;
use clap::Parser;
use crossbeam_channel::{Receiver, unbounded};
use log::{error, info, warn};

use conveyorshift::components::anomaly::AnomalyTrigger;
use conveyorshift::events::grab::GrabEvent;
use conveyorshift::participant::ScriptedParticipant;
use conveyorshift::resources::scenarioconfig::ScenarioConfig;
use conveyorshift::scenario::Scenario;

#[derive(Parser)]
#[command(version, about = "Headless conveyor sorting scenario")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Override the spawner seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Stop after this much simulated time.
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,

    /// Chance that the scripted participant picks the wrong receptacle.
    #[arg(long, default_value_t = 0.1)]
    mistake_rate: f32,

    /// Never pick up the anomaly body.
    #[arg(long)]
    no_activate: bool,

    /// Read commands from stdin (grab, cleanup, quit) and run in real time.
    #[arg(long)]
    interactive: bool,

    /// Write the JSON run report to PATH instead of stdout.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Grab,
    Cleanup,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "grab" | "g" => Some(Command::Grab),
        "cleanup" | "c" => Some(Command::Cleanup),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Forward stdin lines to the main loop over a channel.
fn spawn_stdin_bridge() -> Receiver<Command> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => warn!("Unknown command '{}'", line.trim()),
            }
        }
    });
    rx
}

fn grab_anomaly(scenario: &mut Scenario) {
    let world = scenario.world_mut();
    let target = world
        .query_filtered::<Entity, With<AnomalyTrigger>>()
        .iter(world)
        .next();
    match target {
        Some(entity) => scenario.grab(GrabEvent::select(entity)),
        None => info!("No anomaly body to grab yet"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ScenarioConfig::with_path(path),
        None => ScenarioConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        if cli.config.is_some() {
            error!("{}", e);
            std::process::exit(1);
        }
        info!("No config file, using defaults");
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    if cli.dt <= 0.0 {
        error!("--dt must be positive");
        std::process::exit(1);
    }

    let participant_seed = config.seed.map(|s| s.wrapping_add(1));
    let mut scenario = Scenario::new(config);
    let mut participant =
        ScriptedParticipant::new(cli.mistake_rate, !cli.no_activate, participant_seed);
    let commands = cli.interactive.then(spawn_stdin_bridge);

    let max_ticks = (cli.max_seconds / cli.dt).ceil() as u64;
    'run: for _ in 0..max_ticks {
        if let Some(rx) = &commands {
            for cmd in rx.try_iter() {
                match cmd {
                    Command::Grab => grab_anomaly(&mut scenario),
                    Command::Cleanup => scenario.trigger_cleanup(),
                    Command::Quit => break 'run,
                }
            }
        }
        participant.act(&mut scenario);
        scenario.tick(cli.dt);
        if scenario.is_finished() {
            break;
        }
        if cli.interactive {
            thread::sleep(Duration::from_secs_f32(cli.dt));
        }
    }

    let report = scenario.report();
    info!(
        "Run ended in {:?} ({:?}) after {:.1}s",
        report.phase, report.stage, report.elapsed
    );
    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialise report: {}", e);
            std::process::exit(1);
        }
    };
    match cli.report {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                error!("Failed to write report to {:?}: {}", path, e);
                std::process::exit(1);
            }
        }
        None => println!("{}", json),
    }
}
