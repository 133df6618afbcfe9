//! Win-rate sweep: defender win probability across troop ranges and all six
//! dice-ceiling pairs.
//!
//! Modes:
//!   equal            — equal troops on both sides (default)
//!   fixed-defender   — defender fixed at `--fixed N`, attacker swept
//!   fixed-attacker   — attacker fixed at `--fixed N`, defender swept
//!
//! Prints one win-rate table with a column per dice pair (d1a1..d2a3). With
//! `--output DIR`, writes the same table to `DIR/sweep_results.csv`.

use std::fs;
use std::io::Write;
use std::time::Instant;

use conquest::constants::{SWEEP_TROOPS_MAX, SWEEP_TROOPS_MIN};
use conquest::env_config;
use conquest::simulation::sweep::{dice_sweep, FixedSide, SweepSeries};

struct Args {
    fixed: Option<FixedSide>,
    lo: u32,
    hi: u32,
    trials: usize,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut mode = "equal".to_string();
    let mut fixed_troops = 3u32;
    let mut lo = SWEEP_TROOPS_MIN;
    let mut hi = SWEEP_TROOPS_MAX;
    let mut trials = 1_000usize;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let parse_value = |args: &[String], i: &mut usize, name: &str| -> String {
        *i += 1;
        args.get(*i).cloned().unwrap_or_else(|| {
            eprintln!("Missing value for {}", name);
            std::process::exit(1);
        })
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => mode = parse_value(&args, &mut i, "--mode"),
            "--fixed" => {
                fixed_troops = parse_value(&args, &mut i, "--fixed").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --fixed value");
                    std::process::exit(1);
                })
            }
            "--range" => {
                let value = parse_value(&args, &mut i, "--range");
                let parts: Vec<&str> = value.split(':').collect();
                let parsed = match parts.as_slice() {
                    [a, b] => a.parse().ok().zip(b.parse().ok()),
                    _ => None,
                };
                match parsed {
                    Some((a, b)) => {
                        lo = a;
                        hi = b;
                    }
                    None => {
                        eprintln!("Invalid --range value (expected LO:HI): {}", value);
                        std::process::exit(1);
                    }
                }
            }
            "--trials" => {
                trials = parse_value(&args, &mut i, "--trials").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --trials value");
                    std::process::exit(1);
                })
            }
            "--seed" => {
                seed = parse_value(&args, &mut i, "--seed").parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value");
                    std::process::exit(1);
                })
            }
            "--output" => output = Some(parse_value(&args, &mut i, "--output")),
            "--help" | "-h" => {
                println!("Usage: sweep [OPTIONS]");
                println!();
                println!("Defender win-rate curves across troop counts and dice pairs.");
                println!("  --mode M      equal | fixed-defender | fixed-attacker (default: equal)");
                println!("  --fixed N     Troop count of the fixed side (default: 3)");
                println!("  --range LO:HI Swept troop range (default: {}:{})", SWEEP_TROOPS_MIN, SWEEP_TROOPS_MAX);
                println!("  --trials N    Battles per point (default: 1000)");
                println!("  --seed S      RNG seed (default: 42)");
                println!("  --output DIR  Write sweep_results.csv to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let fixed = match mode.as_str() {
        "equal" => None,
        "fixed-defender" => Some(FixedSide::Defender(fixed_troops)),
        "fixed-attacker" => Some(FixedSide::Attacker(fixed_troops)),
        other => {
            eprintln!("Unknown mode: {}", other);
            std::process::exit(1);
        }
    };

    Args {
        fixed,
        lo,
        hi,
        trials,
        seed,
        output,
    }
}

/// Collect the union of swept troop counts across series (some series skip
/// unfightable points).
fn row_troops(all: &[SweepSeries]) -> Vec<u32> {
    let mut troops: Vec<u32> = all
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.troops))
        .collect();
    troops.sort_unstable();
    troops.dedup();
    troops
}

fn rate_at(series: &SweepSeries, troops: u32) -> Option<f64> {
    series
        .points
        .iter()
        .find(|p| p.troops == troops)
        .map(|p| p.defender_win_rate)
}

fn main() {
    let args = parse_args();
    let num_threads = env_config::init_rayon_threads();

    let mode_desc = match args.fixed {
        None => "equal troops on both sides".to_string(),
        Some(FixedSide::Defender(n)) => format!("defender fixed at {}, attacker swept", n),
        Some(FixedSide::Attacker(n)) => format!("attacker fixed at {}, defender swept", n),
    };

    println!("═══════════════════════════════════════════════════════");
    println!("  Defender Win-Rate Sweep");
    println!("═══════════════════════════════════════════════════════");
    println!("  Mode:    {}", mode_desc);
    println!("  Range:   {}..={}", args.lo, args.hi);
    println!("  Trials:  {} per point", args.trials);
    println!("  Seed:    {}", args.seed);
    println!("  Threads: {}", num_threads);
    println!();

    let t0 = Instant::now();
    let all = dice_sweep(args.fixed, args.lo, args.hi, args.trials, args.seed);
    let troops = row_troops(&all);

    if troops.is_empty() {
        eprintln!("No valid configurations in the requested range.");
        std::process::exit(1);
    }

    // Header: one column per dice pair.
    print!("  {:>6}", "troops");
    for series in &all {
        print!(" {:>7}", series.dice.label());
    }
    println!();
    println!("  {}", "─".repeat(6 + all.len() * 8));

    for &t in &troops {
        print!("  {:>6}", t);
        for series in &all {
            match rate_at(series, t) {
                Some(rate) => print!(" {:>7.3}", rate),
                None => print!(" {:>7}", "-"),
            }
        }
        println!();
    }

    println!();
    println!("  Total: {:.1}s", t0.elapsed().as_secs_f64());

    if let Some(ref dir) = args.output {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create output directory: {}", e);
            std::process::exit(1);
        }
        let path = format!("{}/sweep_results.csv", dir);
        let file = fs::File::create(&path).unwrap_or_else(|e| {
            eprintln!("Failed to create {}: {}", path, e);
            std::process::exit(1);
        });
        let mut f = std::io::BufWriter::new(file);

        let mut header = String::from("troops");
        for series in &all {
            header.push(',');
            header.push_str(&series.dice.label());
        }
        writeln!(f, "{}", header).unwrap();
        for &t in &troops {
            write!(f, "{}", t).unwrap();
            for series in &all {
                match rate_at(series, t) {
                    Some(rate) => write!(f, ",{:.4}", rate).unwrap(),
                    None => write!(f, ",").unwrap(),
                }
            }
            writeln!(f).unwrap();
        }
        drop(f);
        println!("  Wrote {}", path);
    }
}
