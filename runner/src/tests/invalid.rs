use pretty_assertions::assert_eq;
use processor::Processor;
use scheduler::{round_robin, Pid, Process, SchedulingError};

use super::{processes, scheduler};

#[test]
pub fn empty_list() {
    assert_eq!(
        Processor::run(scheduler(), &[]),
        Err(SchedulingError::NoProcesses)
    );
}

#[test]
pub fn duplicate_pid() {
    let processes = processes(&[("P1", 0, 2, 0), ("P2", 1, 2, 0), ("P2", 3, 1, 0)]);

    assert_eq!(
        Processor::run(scheduler(), &processes),
        Err(SchedulingError::DuplicatePid(Pid::new("P2").unwrap()))
    );
}

#[test]
pub fn zero_burst() {
    assert_eq!(
        Process::new("P1", 0, 0, 0),
        Err(SchedulingError::ZeroBurst(Pid::new("P1").unwrap()))
    );
}

#[test]
pub fn zero_quantum() {
    let processes = processes(&[("P1", 0, 2, 0)]);

    assert_eq!(
        Processor::run(round_robin(0), &processes),
        Err(SchedulingError::InvalidQuantum(0))
    );
}

#[test]
pub fn clock_overflow() {
    let processes = processes(&[("P1", 0, 4, 0), ("P2", usize::MAX - 2, 1, 0)]);

    assert_eq!(
        Processor::run(scheduler(), &processes),
        Err(SchedulingError::TimeOverflow)
    );
}
