use std::env;

use anyhow::Context;
use log::LevelFilter;
use scheduler::{fcfs, priority, round_robin, sjf, Process};

use processor::format_report;
use processor::Processor;

mod logger;

fn main() -> anyhow::Result<()> {
    logger::init(log_level()?);

    let quantum = quantum()?;
    let processes = processes()?;

    println!("{}", format_report(&Processor::run(fcfs(), &processes)?));
    println!("{}", format_report(&Processor::run(sjf(), &processes)?));
    println!("{}", format_report(&Processor::run(priority(), &processes)?));
    println!(
        "{}",
        format_report(&Processor::run(round_robin(quantum), &processes)?)
    );

    Ok(())
}

fn processes() -> anyhow::Result<Vec<Process>> {
    [
        ("P1", 0, 7, 3),
        ("P2", 2, 4, 1),
        ("P3", 4, 1, 4),
        ("P4", 5, 4, 2),
        ("P5", 20, 3, 0),
    ]
    .into_iter()
    .map(|(pid, arrival, burst, priority)| {
        Process::new(pid, arrival, burst, priority)
            .with_context(|| format!("invalid process {pid}"))
    })
    .collect()
}

fn quantum() -> anyhow::Result<usize> {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .context("QUANTUM must be a non-negative integer")
}

fn log_level() -> anyhow::Result<LevelFilter> {
    env::var("SCHED_LOG")
        .unwrap_or("warn".to_string())
        .parse::<LevelFilter>()
        .context("SCHED_LOG must be one of off, error, warn, info, debug, trace")
}

// Do not delete this line
#[cfg(test)]
mod tests;
