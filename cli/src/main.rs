//! Bean machine command-line driver
//!
//! Runs the machine in text mode: drops the requested number of beans and
//! prints the final per-slot bean counts. With `debug`, the full board state
//! is printed after the initial load and after every step.
//!
//! Malformed arguments (non-integer counts, a zero slot count, an
//! unrecognized mode) print usage text and exit without running the
//! simulation.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use tracing::debug;

use bean_machine_core_rs::{Bean, BeanMachine, BeanMode, RngManager};

#[derive(Parser)]
#[command(
    name = "bean-machine",
    about = "Galton box simulator: drop beans through a peg board into slots",
    after_help = "Examples:\n  bean-machine 10 400 luck\n  bean-machine 20 1000 skill debug"
)]
struct Args {
    /// Number of slots at the bottom of the board (at least 1)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    slot_count: u32,

    /// Number of beans to drop
    bean_count: u32,

    /// How beans decide their path at each peg
    #[arg(value_enum)]
    mode: Mode,

    /// Pass `debug` to print the board state after every step
    #[arg(value_enum)]
    debug: Option<DebugFlag>,

    /// Seed for the shared random source (defaults to a time-derived seed)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// 50/50 coin flip at every peg
    Luck,
    /// Fixed per-bean skill level, deterministic path
    Skill,
}

impl From<Mode> for BeanMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Luck => BeanMode::Luck,
            Mode::Skill => BeanMode::Skill,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DebugFlag {
    Debug,
}

/// Seed drawn from the wall clock, for runs without an explicit `--seed`
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let show_board = args.debug.is_some();
    let slot_count = args.slot_count as usize;
    let seed = args.seed.unwrap_or_else(time_seed);
    debug!(slot_count, bean_count = args.bean_count, seed, "starting experiment");

    // One shared random source for the whole experiment: reproducible runs
    // under a fixed --seed
    let rng = RngManager::shared(seed);
    let beans: Vec<Bean> = (0..args.bean_count)
        .map(|_| Bean::new(slot_count, args.mode.into(), &rng))
        .collect();

    let mut machine = BeanMachine::new(slot_count);
    machine.reset(beans);

    if show_board {
        println!("{machine}");
    }

    // Perform the experiment
    while machine.advance_step() {
        if show_board {
            println!("{machine}");
        }
    }

    println!("Slot bean counts:");
    println!("{}", machine.slot_string());
}
