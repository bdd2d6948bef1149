use std::collections::VecDeque;

use crate::scheduler::validate;
use crate::{Outcome, Process, Schedule, Scheduler, SchedulingError, Segment};

/// Round-Robin, preemptive.
///
/// A process runs for at most `quantum` time units, after which it goes
/// back to the end of the ready queue. Processes that arrive while a slice
/// runs are queued before the preempted process.
///
/// The `start` of an [`Outcome`] is the start of the slice that completed
/// the process. Earlier slices are in [`Schedule::timeline`].
#[derive(Debug, Copy, Clone)]
pub struct RoundRobin {
    quantum: usize,
}

impl RoundRobin {
    pub fn new(quantum: usize) -> Self {
        RoundRobin { quantum }
    }
}

/// The ready queue together with the processes that have not arrived yet.
///
/// Processes are referred to by their index in `source`.
struct RunQueue<'a> {
    source: Vec<&'a Process>,
    arrived: Vec<bool>,
    next: usize,
    ready: VecDeque<usize>,
}

impl<'a> RunQueue<'a> {
    fn new(processes: &'a [Process]) -> Self {
        let mut source: Vec<&Process> = processes.iter().collect();
        source.sort_by_key(|process| process.arrival());
        RunQueue {
            arrived: vec![false; source.len()],
            source,
            next: 0,
            ready: VecDeque::new(),
        }
    }

    /// Queue every process that has arrived by `time`.
    fn admit(&mut self, time: usize) {
        while self.next < self.source.len() && self.source[self.next].arrival() <= time {
            if !self.arrived[self.next] {
                self.arrived[self.next] = true;
                self.ready.push_back(self.next);
                log::trace!("{} ready at {}", self.source[self.next].pid(), time);
            }
            self.next += 1;
        }
    }

    /// The next process to arrive.
    fn upcoming(&self) -> Option<&'a Process> {
        self.source.get(self.next).copied()
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> String {
        format!("Round Robin (Q={})", self.quantum)
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        if self.quantum == 0 {
            log::warn!("refusing to schedule with a quantum of 0");
            return Err(SchedulingError::InvalidQuantum(self.quantum));
        }
        validate(processes)?;

        let mut run_queue = RunQueue::new(processes);
        let total = run_queue.source.len();
        let mut remaining: Vec<usize> = run_queue.source.iter().map(|p| p.burst()).collect();
        let mut outcomes = Vec::with_capacity(total);
        let mut timeline = Vec::new();
        let mut time = 0;

        while outcomes.len() < total {
            run_queue.admit(time);

            let Some(current) = run_queue.ready.pop_front() else {
                let Some(process) = run_queue.upcoming() else {
                    return Err(SchedulingError::Internal(format!(
                        "{} processes left but none is ready or arriving",
                        total - outcomes.len()
                    )));
                };
                log::trace!("idle from {} to {}", time, process.arrival());
                time = process.arrival();
                continue;
            };

            let process = run_queue.source[current];
            let slice = self.quantum.min(remaining[current]);
            log::trace!("dispatch {} at {} for {}", process.pid(), time, slice);

            timeline.push(Segment::new(process.pid().clone(), time, slice));
            // a finished process reports the start of its last slice
            let start = time;
            time += slice;
            remaining[current] -= slice;

            // arrivals during the slice go ahead of the preempted process
            run_queue.admit(time);

            if remaining[current] > 0 {
                run_queue.ready.push_back(current);
            } else {
                outcomes.push(Outcome::new(process, start, time)?);
                log::debug!("{} finished at {}", process.pid(), time);
            }
        }

        Ok(Schedule { outcomes, timeline })
    }
}
