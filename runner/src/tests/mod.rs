#[cfg(feature = "fcfs")]
use scheduler::fcfs;
#[cfg(feature = "priority")]
use scheduler::priority;
#[cfg(not(any(feature = "fcfs", feature = "sjf", feature = "priority")))]
use scheduler::round_robin;
#[cfg(feature = "sjf")]
use scheduler::sjf;
use scheduler::{Process, Scheduler};

use std::env;
use std::fs;

use processor::format_report;
use processor::Report;

mod invalid;
mod workload;

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, report: &Report) {
    let output = format_report(report);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn processes(list: &[(&str, usize, usize, i32)]) -> Vec<Process> {
    list.iter()
        .map(|&(pid, arrival, burst, priority)| {
            Process::new(pid, arrival, burst, priority).unwrap()
        })
        .collect()
}

fn arguments() -> usize {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .unwrap()
}

#[cfg(feature = "fcfs")]
static SCHEDULER: &str = "fcfs";
#[cfg(feature = "fcfs")]
fn scheduler() -> impl Scheduler {
    println!("Scheduler FCFS");
    fcfs()
}

#[cfg(all(feature = "sjf", not(feature = "fcfs")))]
static SCHEDULER: &str = "sjf";
#[cfg(all(feature = "sjf", not(feature = "fcfs")))]
fn scheduler() -> impl Scheduler {
    println!("Scheduler SJF");
    sjf()
}

#[cfg(all(feature = "priority", not(any(feature = "fcfs", feature = "sjf"))))]
static SCHEDULER: &str = "priority";
#[cfg(all(feature = "priority", not(any(feature = "fcfs", feature = "sjf"))))]
fn scheduler() -> impl Scheduler {
    println!("Scheduler Priority");
    priority()
}

#[cfg(not(any(feature = "fcfs", feature = "sjf", feature = "priority")))]
static SCHEDULER: &str = "round-robin";
#[cfg(not(any(feature = "fcfs", feature = "sjf", feature = "priority")))]
fn scheduler() -> impl Scheduler {
    let quantum = arguments();

    println!("Quantum {quantum}");
    round_robin(quantum)
}
