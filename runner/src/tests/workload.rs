use core::module_path;
use function_name::named;
use processor::Processor;

use super::{processes, run, scheduler};

#[test]
#[named]
pub fn mixed() {
    let processes = processes(&[
        ("P1", 0, 7, 3),
        ("P2", 2, 4, 1),
        ("P3", 4, 1, 4),
        ("P4", 5, 4, 2),
        ("P5", 20, 3, 0),
    ]);
    let report = Processor::run(scheduler(), &processes).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn exact_quantum_multiple() {
    let processes = processes(&[
        ("P1", 0, 4, 1),
        ("P2", 0, 6, 0),
        ("P3", 3, 2, 2),
    ]);
    let report = Processor::run(scheduler(), &processes).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn staggered() {
    let processes = processes(&[
        ("P1", 3, 4, 2),
        ("P2", 0, 6, 4),
        ("P3", 3, 1, 1),
        ("P4", 14, 2, 0),
        ("P5", 5, 3, 3),
        ("P6", 5, 3, 1),
    ]);
    let report = Processor::run(scheduler(), &processes).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}
