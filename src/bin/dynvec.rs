use anyhow::{Context, Result};
use dynvec::cli::Cli;
use dynvec::logging;
use dynvec::scenario::{self, Resize, ScenarioReport};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::setup_tracing(cli.verbose).context("failed to set up tracing")?;

    let command = cli.scenario();
    let report = scenario::run(command, cli.initial_capacity)
        .with_context(|| format!("Scenario failed: {command:?}"))?;
    print_report(&report, cli.verbose > 0);

    Ok(())
}

fn print_report(report: &ScenarioReport, verbose: bool) {
    if verbose {
        println!(
            "[{}] start: size {}, capacity {}",
            report.name, report.initial.size, report.initial.capacity
        );
        for resize in &report.resizes {
            match resize {
                Resize::Grew { from, to, size } => println!("grew {from} -> {to} at size {size}"),
                Resize::Shrank { from, to, size } => println!("shrank {from} -> {to} at size {size}"),
            }
        }
    }

    for value in &report.contents {
        println!("{value}");
    }

    if verbose {
        println!(
            "[{}] end: size {}, capacity {}",
            report.name, report.last.size, report.last.capacity
        );
    }
}
