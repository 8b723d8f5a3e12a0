//! Texture generation utility
//!
//! Generates every world sprite and writes them as PNGs with an index.
//!
//! Usage:
//!     generate_textures [OPTIONS] <OUTPUT_DIR>
//!
//! Options:
//!     -c, --config <FILE>         JSON game config (palette, seed, variation counts)
//!     --seed <SEED>               Base seed (default: 0)
//!     -n, --variations <N>        Tree variations (default: 3)
//!     --rock-variations <N>       Rock variations (default: 3)
//!     -h, --help                  Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use geselle::config::GameConfig;
use geselle::core::logging;
use geselle::sprite::generate_textures_with;

fn print_help() {
    eprintln!("generate_textures - Sprite generation utility");
    eprintln!();
    eprintln!("Usage: generate_textures [OPTIONS] <OUTPUT_DIR>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>         JSON game config (palette, seed, variation counts)");
    eprintln!("    --seed <SEED>               Base seed (default: 0)");
    eprintln!("    -n, --variations <N>        Tree variations (default: 3)");
    eprintln!("    --rock-variations <N>       Rock variations (default: 3)");
    eprintln!("    -h, --help                  Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    generate_textures ./assets/sprites");
    eprintln!("    generate_textures --seed 42 -n 6 ./assets/sprites");
}

#[derive(Debug)]
struct Args {
    output_dir: PathBuf,
    config: Option<PathBuf>,
    seed: Option<f64>,
    variations: Option<u32>,
    rock_variations: Option<u32>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        return Err("Missing output directory".to_string());
    }

    let mut config = None;
    let mut seed = None;
    let mut variations = None;
    let mut rock_variations = None;
    let mut output_dir: Option<PathBuf> = None;

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
                config = Some(PathBuf::from(value));
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --seed")?;
                let parsed: f64 = value.parse().map_err(|_| format!("Invalid seed: {}", value))?;
                if !parsed.is_finite() {
                    return Err(format!("Invalid seed: {}", value));
                }
                seed = Some(parsed);
            }
            "-n" | "--variations" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --variations")?;
                variations = Some(value.parse().map_err(|_| format!("Invalid variations: {}", value))?);
            }
            "--rock-variations" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --rock-variations")?;
                rock_variations = Some(value.parse().map_err(|_| format!("Invalid rock-variations: {}", value))?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => {
                if output_dir.is_some() {
                    return Err("Multiple output directories specified".to_string());
                }
                output_dir = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let output_dir = output_dir.ok_or("Missing output directory")?;

    Ok(Args { output_dir, config, seed, variations, rock_variations })
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

    let mut config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(n) = args.variations {
        config.generation.tree_variations = n;
    }
    if let Some(n) = args.rock_variations {
        config.generation.rock_variations = n;
    }

    println!("Texture Generation Utility");
    println!("==========================");
    println!("Output directory: {}", args.output_dir.display());
    println!("Base seed: {}", config.generation.seed);
    println!("Tree variations: {}", config.generation.tree_variations);
    println!("Rock variations: {}", config.generation.rock_variations);
    println!();

    let start = Instant::now();
    let registry = generate_textures_with(&config.generation, &config.palette);
    let gen_elapsed = start.elapsed();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            std::process::exit(1);
        }
    };
    let index = match rt.block_on(registry.save(&args.output_dir)) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error writing textures: {}", e);
            std::process::exit(1);
        }
    };

    println!("Summary:");
    println!("  Textures generated: {}", registry.len());
    println!("  Generation time: {:.2}s", gen_elapsed.as_secs_f64());
    println!("  Total time: {:.2}s", start.elapsed().as_secs_f64());
    println!("  Index entries: {}", index.entries.len());
    println!("  Output: {}", args.output_dir.display());
}
