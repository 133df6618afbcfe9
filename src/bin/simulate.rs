//! Battle simulator: one verbose traced battle, or an N-battle batch with
//! aggregate statistics.
//!
//! With `--verbose`, resolves a single battle and prints every round. Without
//! it, runs `--battles` independent trials in parallel and reports win rates
//! and distributions. With `--output DIR`, also writes
//! `DIR/battle_stats.json`.

use std::path::Path;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use conquest::env_config;
use conquest::simulation::engine::{simulate_batch, BattleConfig};
use conquest::simulation::statistics::{aggregate_statistics, save_statistics};

struct Args {
    config: BattleConfig,
    num_battles: usize,
    seed: u64,
    verbose: bool,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut attacker_troops = 7u32;
    let mut defender_troops = 5u32;
    let mut attacker_dice = 3u32;
    let mut defender_dice = 2u32;
    let mut num_battles = 10_000usize;
    let mut seed = 42u64;
    let mut verbose = false;
    let mut output: Option<String> = None;

    let parse_value = |args: &[String], i: &mut usize, name: &str| -> String {
        *i += 1;
        args.get(*i)
            .cloned()
            .unwrap_or_else(|| {
                eprintln!("Missing value for {}", name);
                std::process::exit(1);
            })
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--attacker" => {
                attacker_troops = parse_value(&args, &mut i, "--attacker").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --attacker value");
                    std::process::exit(1);
                })
            }
            "--defender" => {
                defender_troops = parse_value(&args, &mut i, "--defender").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --defender value");
                    std::process::exit(1);
                })
            }
            "--attacker-dice" => {
                attacker_dice = parse_value(&args, &mut i, "--attacker-dice").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --attacker-dice value");
                    std::process::exit(1);
                })
            }
            "--defender-dice" => {
                defender_dice = parse_value(&args, &mut i, "--defender-dice").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --defender-dice value");
                    std::process::exit(1);
                })
            }
            "--battles" => {
                num_battles = parse_value(&args, &mut i, "--battles").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --battles value");
                    std::process::exit(1);
                })
            }
            "--seed" => {
                seed = parse_value(&args, &mut i, "--seed").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value");
                    std::process::exit(1);
                })
            }
            "--verbose" | "-v" => verbose = true,
            "--output" => output = Some(parse_value(&args, &mut i, "--output")),
            "--help" | "-h" => {
                println!("Usage: simulate [OPTIONS]");
                println!();
                println!("Resolve Risk-style battles between one attacker and one defender.");
                println!("  --attacker N        Attacking troops, incl. the one left behind (default: 7)");
                println!("  --defender N        Defending troops (default: 5)");
                println!("  --attacker-dice N   Attacker dice ceiling (default: 3)");
                println!("  --defender-dice N   Defender dice ceiling (default: 2)");
                println!("  --battles N         Trials for batch mode (default: 10000)");
                println!("  --seed S            RNG seed (default: 42)");
                println!("  --verbose           Resolve one battle and print every round");
                println!("  --output DIR        Write battle_stats.json to DIR (batch mode)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        config: BattleConfig::new(attacker_troops, defender_troops)
            .with_max_dice(defender_dice, attacker_dice),
        num_battles,
        seed,
        verbose,
        output,
    }
}

fn run_verbose(config: &BattleConfig, seed: u64) {
    let engine = match config.build() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Attacker starts with {} troops (ceiling {} dice)",
        config.attacker_troops, config.attacker_max_dice
    );
    println!(
        "Defender starts with {} troops (ceiling {} dice)",
        config.defender_troops, config.defender_max_dice
    );
    println!("{}", "─".repeat(50));

    let mut rng = SmallRng::seed_from_u64(seed);
    let outcome = engine.run_traced(&mut rng, |trace| {
        println!("Round {}", trace.round);
        println!("  Attacker rolled: {:?}", trace.attacker_roll);
        println!("  Defender rolled: {:?}", trace.defender_roll);
        println!(
            "  Losses: attacker -{}, defender -{}",
            trace.attacker_losses, trace.defender_losses
        );
        println!(
            "  Troops remaining: attacker {}, defender {}",
            trace.attacker_troops, trace.defender_troops
        );
    });

    println!("{}", "─".repeat(50));
    println!(
        "{:?} wins after {} rounds with {} troops remaining",
        outcome.winner, outcome.rounds, outcome.troops_remaining
    );
}

fn main() {
    let args = parse_args();

    if args.verbose {
        run_verbose(&args.config, args.seed);
        return;
    }

    let num_threads = env_config::init_rayon_threads();

    println!("═══════════════════════════════════════════════════════");
    println!("  Battle Simulation");
    println!("═══════════════════════════════════════════════════════");
    println!(
        "  Attacker:  {:>6} troops, ceiling {} dice",
        args.config.attacker_troops, args.config.attacker_max_dice
    );
    println!(
        "  Defender:  {:>6} troops, ceiling {} dice",
        args.config.defender_troops, args.config.defender_max_dice
    );
    println!("  Battles:   {:>6}", args.num_battles);
    println!("  Seed:      {:>6}", args.seed);
    println!("  Threads:   {:>6}", num_threads);
    println!();

    let t0 = Instant::now();
    let result = match simulate_batch(&args.config, args.num_battles, args.seed) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let stats = aggregate_statistics(&args.config, &result.outcomes, args.seed);

    println!(
        "  Defender wins: {:>8}  ({:.2}%)",
        stats.defender_wins,
        stats.defender_win_rate * 100.0
    );
    println!(
        "  Attacker wins: {:>8}  ({:.2}%)",
        stats.attacker_wins,
        stats.attacker_win_rate * 100.0
    );
    println!(
        "  Rounds:        mean {:.2}, median {}, range {}-{}",
        stats.rounds.mean, stats.rounds.median, stats.rounds.min, stats.rounds.max
    );
    println!(
        "  Winner troops: attacker {:.2}, defender {:.2} (mean when winning)",
        stats.mean_attacker_troops_when_winning, stats.mean_defender_troops_when_winning
    );
    println!();
    println!("  Total: {:.2}s", t0.elapsed().as_secs_f64());

    if let Some(ref dir) = args.output {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create output directory: {}", e);
            std::process::exit(1);
        }
        let path = Path::new(dir).join("battle_stats.json");
        match save_statistics(&path, &stats) {
            Ok(()) => println!("  Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}
