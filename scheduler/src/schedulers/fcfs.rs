use crate::scheduler::validate;
use crate::{Outcome, Process, Schedule, Scheduler, SchedulingError};

/// First-Come-First-Served.
///
/// Processes run to completion in the order they arrive. Processes that
/// arrive at the same time keep the order they were given in.
#[derive(Debug, Copy, Clone, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn name(&self) -> String {
        String::from("FCFS")
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let mut queue: Vec<&Process> = processes.iter().collect();
        queue.sort_by_key(|process| process.arrival());

        let mut time = 0;
        let mut outcomes = Vec::with_capacity(queue.len());
        for process in queue {
            let start = time.max(process.arrival());
            let finish = start + process.burst();
            log::trace!("dispatch {} at {} for {}", process.pid(), start, process.burst());

            outcomes.push(Outcome::new(process, start, finish)?);
            log::debug!("{} finished at {}", process.pid(), finish);
            time = finish;
        }

        Ok(Schedule::from_outcomes(outcomes))
    }
}
