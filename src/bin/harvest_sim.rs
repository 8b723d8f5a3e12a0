//! Headless harvest simulation
//!
//! Walks a player around the stock world at a fixed time step, holding
//! interact whenever something harvestable is in reach, and reports what
//! was collected.
//!
//! Usage:
//!     harvest_sim [OPTIONS]
//!
//! Options:
//!     -c, --config <FILE>     JSON game config
//!     --seconds <S>           Simulated time limit (default: 300)
//!     --step <MS>             Frame time step in ms (default: 16)
//!     --speed <PX>            Walk speed in px/s (default: 150)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;

use glam::Vec2;

use geselle::config::GameConfig;
use geselle::core::logging;
use geselle::world::{Harvester, InteractionPrompt, ObjectKind, World, WorldObject};

fn print_help() {
    eprintln!("harvest_sim - Headless harvest simulation");
    eprintln!();
    eprintln!("Usage: harvest_sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>     JSON game config");
    eprintln!("    --seconds <S>           Simulated time limit (default: 300)");
    eprintln!("    --step <MS>             Frame time step in ms (default: 16)");
    eprintln!("    --speed <PX>            Walk speed in px/s (default: 150)");
    eprintln!("    -h, --help              Show this help message");
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    seconds: f32,
    step_ms: f32,
    speed: f32,
}

fn parse_positive(flag: &str, value: Option<&String>) -> Result<f32, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    match value.parse::<f32>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!("Invalid {}: {}", flag.trim_start_matches('-'), value)),
    }
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut parsed = Args { config: None, seconds: 300.0, step_ms: 16.0, speed: 150.0 };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --config")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--seconds" => {
                i += 1;
                parsed.seconds = parse_positive("--seconds", args.get(i))?;
            }
            "--step" => {
                i += 1;
                parsed.step_ms = parse_positive("--step", args.get(i))?;
            }
            "--speed" => {
                i += 1;
                parsed.speed = parse_positive("--speed", args.get(i))?;
            }
            arg => return Err(format!("Unknown option: {}", arg)),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Closest harvestable bush or tree
fn next_goal(world: &World, from: Vec2) -> Option<&WorldObject> {
    world
        .objects()
        .iter()
        .filter(|o| matches!(o.kind, ObjectKind::Bush | ObjectKind::Tree) && o.is_harvestable())
        .min_by(|a, b| a.distance_to(from).total_cmp(&b.distance_to(from)))
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut world = World::default_layout(&config.generation);
    let mut harvester = Harvester::new(&config.harvest);
    let mut player = Vec2::new(world.width / 2.0, world.height / 2.0);

    let limit_ms = args.seconds * 1000.0;
    let mut time_ms = 0.0;
    let mut harvests = 0u32;
    let mut last_prompt = InteractionPrompt::None;
    let mut last_quarter = 0u32;

    println!("Harvest Simulation");
    println!("==================");
    println!("Objects: {}", world.len());
    println!("Time limit: {}s, step: {}ms", args.seconds, args.step_ms);
    println!();

    while time_ms < limit_ms {
        let Some(goal) = next_goal(&world, player) else {
            log::info!("Nothing left to harvest");
            break;
        };
        let reach = match goal.kind {
            ObjectKind::Bush => harvester.ranges().bush,
            _ => harvester.ranges().tree,
        } * 0.5;
        let to_goal = goal.position - player;
        let in_reach = to_goal.length() < reach;
        if !in_reach {
            let step = args.speed * args.step_ms / 1000.0;
            player += to_goal.clamp_length_max(step);
        }

        if let Some(outcome) = harvester.update(&mut world, player, in_reach, args.step_ms) {
            harvests += 1;
            println!(
                "[{:>7.2}s] +{} {} -> {}  ({})",
                time_ms / 1000.0,
                outcome.amount,
                outcome.resource,
                outcome.texture_key,
                harvester.tally()
            );
        }

        let prompt = harvester.current_prompt();
        if prompt != last_prompt {
            log::debug!("Prompt: {:?}", prompt);
            last_prompt = prompt;
        }
        let quarter = (harvester.session_progress() * 4.0).floor() as u32;
        if quarter != last_quarter {
            log::trace!("Progress {:.0}%", harvester.session_progress() * 100.0);
            last_quarter = quarter;
        }

        time_ms += args.step_ms;
    }

    println!();
    println!("Summary:");
    println!("  Harvests: {}", harvests);
    println!("  {}", harvester.tally());
    println!("  Simulated time: {:.1}s", time_ms / 1000.0);
}
