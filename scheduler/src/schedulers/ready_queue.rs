use crate::scheduler::validate;
use crate::{Outcome, Process, Schedule, Scheduler, SchedulingError};

/// The key that a [`ReadyQueue`] scheduler uses to pick the next process.
///
/// The process with the smallest key runs first.
pub trait SortKey {
    type Key: Ord;

    /// The name of the policy that uses this key.
    const NAME: &'static str;

    fn key(&self, process: &Process) -> Self::Key;
}

/// Orders processes by their burst, the shortest first.
#[derive(Debug, Copy, Clone, Default)]
pub struct ByBurst;

impl SortKey for ByBurst {
    type Key = usize;

    const NAME: &'static str = "SJF";

    fn key(&self, process: &Process) -> usize {
        process.burst()
    }
}

/// Orders processes by their priority, the smallest value first.
#[derive(Debug, Copy, Clone, Default)]
pub struct ByPriority;

impl SortKey for ByPriority {
    type Key = i32;

    const NAME: &'static str = "Priority";

    fn key(&self, process: &Process) -> i32 {
        process.priority()
    }
}

/// A non-preemptive scheduler that always runs the ready process
/// with the smallest key.
///
/// When several ready processes share the smallest key, the one that
/// became ready first runs. When no process is ready, the CPU stays idle
/// until the next arrival.
#[derive(Debug, Copy, Clone, Default)]
pub struct ReadyQueue<K: SortKey> {
    key: K,
}

/// Shortest-Job-First, non-preemptive.
pub type ShortestJobFirst = ReadyQueue<ByBurst>;

/// Priority scheduling, non-preemptive.
pub type Priority = ReadyQueue<ByPriority>;

impl<K: SortKey> ReadyQueue<K> {
    pub fn new(key: K) -> Self {
        ReadyQueue { key }
    }
}

impl<K: SortKey> Scheduler for ReadyQueue<K> {
    fn name(&self) -> String {
        String::from(K::NAME)
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let mut source: Vec<&Process> = processes.iter().collect();
        source.sort_by(|a, b| {
            a.arrival()
                .cmp(&b.arrival())
                .then_with(|| self.key.key(a).cmp(&self.key.key(b)))
        });

        let mut ready: Vec<&Process> = Vec::new();
        let mut outcomes = Vec::with_capacity(source.len());
        let mut next = 0;
        let mut time = 0;

        while outcomes.len() < source.len() {
            while next < source.len() && source[next].arrival() <= time {
                ready.push(source[next]);
                next += 1;
            }

            if ready.is_empty() {
                let Some(process) = source.get(next) else {
                    return Err(SchedulingError::Internal(format!(
                        "{} processes left but none is ready or arriving",
                        source.len() - outcomes.len()
                    )));
                };
                log::trace!("idle from {} to {}", time, process.arrival());
                time = process.arrival();
                continue;
            }

            // stable, so ties go to the process that became ready first
            ready.sort_by_key(|process| self.key.key(process));
            let process = ready.remove(0);

            let start = time;
            let finish = start + process.burst();
            log::trace!("dispatch {} at {} for {}", process.pid(), start, process.burst());

            outcomes.push(Outcome::new(process, start, finish)?);
            log::debug!("{} finished at {}", process.pid(), finish);
            time = finish;
        }

        Ok(Schedule::from_outcomes(outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(pid: &str, arrival: usize, burst: usize, priority: i32) -> Process {
        Process::new(pid, arrival, burst, priority).unwrap()
    }

    fn order(schedule: &Schedule) -> Vec<String> {
        schedule
            .outcomes
            .iter()
            .map(|outcome| outcome.pid().to_string())
            .collect()
    }

    #[test]
    fn sjf_picks_shortest_of_simultaneous_arrivals() {
        let schedule = ShortestJobFirst::default()
            .schedule(&[process("P1", 0, 6, 0), process("P2", 0, 2, 0)])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P2", "P1"]);
        let p2 = schedule.outcome("P2").unwrap();
        assert_eq!((p2.start(), p2.finish()), (0, 2));
        let p1 = schedule.outcome("P1").unwrap();
        assert_eq!((p1.start(), p1.finish()), (2, 8));
    }

    #[test]
    fn sjf_is_not_preemptive() {
        // P2 is shorter but arrives once P1 already holds the CPU
        let schedule = ShortestJobFirst::default()
            .schedule(&[
                process("P1", 0, 8, 0),
                process("P2", 1, 1, 0),
                process("P3", 2, 4, 0),
            ])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P1", "P2", "P3"]);
        assert_eq!(schedule.outcome("P2").unwrap().waiting(), 7);
        assert_eq!(schedule.outcome("P3").unwrap().start(), 9);
    }

    #[test]
    fn sjf_ties_go_to_earliest_ready() {
        let schedule = ShortestJobFirst::default()
            .schedule(&[
                process("P1", 0, 4, 0),
                process("P2", 3, 2, 0),
                process("P3", 1, 2, 0),
                process("P4", 4, 2, 0),
            ])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P1", "P3", "P2", "P4"]);
    }

    #[test]
    fn priority_runs_smallest_value_first() {
        let schedule = Priority::default()
            .schedule(&[process("P1", 0, 4, 5), process("P2", 0, 4, 1)])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P2", "P1"]);
        assert_eq!(schedule.outcome("P1").unwrap().waiting(), 4);
    }

    #[test]
    fn priority_accepts_negative_values() {
        let schedule = Priority::default()
            .schedule(&[
                process("P1", 0, 1, 0),
                process("P2", 0, 1, 3),
                process("P3", 0, 1, -2),
            ])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P3", "P1", "P2"]);
    }

    #[test]
    fn idle_until_next_arrival() {
        let schedule = Priority::default()
            .schedule(&[process("P1", 10, 3, 1)])
            .unwrap();

        let p1 = schedule.outcome("P1").unwrap();
        assert_eq!((p1.start(), p1.waiting()), (10, 0));
        assert_eq!(schedule.idle_time(), 10);
    }

    #[test]
    fn idle_between_bursts() {
        let schedule = ShortestJobFirst::default()
            .schedule(&[
                process("P1", 0, 2, 0),
                process("P2", 6, 3, 0),
                process("P3", 5, 4, 0),
            ])
            .unwrap();

        assert_eq!(order(&schedule), vec!["P1", "P3", "P2"]);
        assert_eq!(schedule.outcome("P3").unwrap().start(), 5);
        assert_eq!(schedule.outcome("P2").unwrap().start(), 9);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            ShortestJobFirst::default().schedule(&[]),
            Err(SchedulingError::NoProcesses)
        );
        assert!(matches!(
            Priority::default().schedule(&[process("P1", 0, 1, 0), process("P1", 1, 1, 0)]),
            Err(SchedulingError::DuplicatePid(_))
        ));
    }

    #[test]
    fn rejects_times_past_the_clock() {
        let processes = [process("P1", usize::MAX - 1, 1, 0), process("P2", 0, 2, 0)];

        assert_eq!(
            ReadyQueue::new(ByBurst).schedule(&processes),
            Err(SchedulingError::TimeOverflow)
        );
        assert_eq!(
            ReadyQueue::new(ByPriority).schedule(&processes),
            Err(SchedulingError::TimeOverflow)
        );
    }

    #[test]
    fn finishes_at_the_end_of_the_clock() {
        let schedule = ReadyQueue::new(ByBurst)
            .schedule(&[process("P1", usize::MAX - 3, 1, 0), process("P2", 0, 2, 0)])
            .unwrap();

        assert_eq!(schedule.outcome("P1").unwrap().finish(), usize::MAX - 2);
    }
}
