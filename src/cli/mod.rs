use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use dyn_array::DEFAULT_CAPACITY;

/// Largest `--initial-capacity` accepted on the command line.
pub const MAX_INITIAL_CAPACITY: u64 = 1 << 24;

#[derive(Parser, Debug)]
#[command(name = "dynvec")]
#[command(version, about = "Exercise the growth and shrink policy of a dynamic array", long_about = None)]
pub struct Cli {
    /// Scenario to run (defaults to `basic`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Initial capacity of the array under test
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_INITIAL_CAPACITY),
        global = true
    )]
    pub initial_capacity: usize,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Push 5 and 6, pop once, print what is left
    Basic,
    /// Push 0..COUNT and read every value back by index
    Fill {
        #[arg(short, long, default_value_t = 21)]
        count: usize,
    },
    /// Push 0..COUNT, then pop until empty and once more
    Drain {
        #[arg(short, long, default_value_t = 64)]
        count: usize,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scenario(&self) -> Command {
        self.command.unwrap_or(Command::Basic)
    }
}
