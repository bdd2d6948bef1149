//! A CPU scheduling library.
//!
//! This library computes the schedule that a set of processes gets
//! under four classic policies: First-Come-First-Served, Shortest-Job-First,
//! Priority and Round-Robin. Every policy is a pure function of its input,
//! the result holds the timings of every process and the timeline of
//! CPU slices.
//!
//! ```rust
//! use scheduler::{round_robin, Process, Scheduler};
//!
//! let processes = vec![
//!     Process::new("P1", 0, 5, 1).unwrap(),
//!     Process::new("P2", 1, 3, 0).unwrap(),
//! ];
//! let schedule = round_robin(2).schedule(&processes).unwrap();
//!
//! assert_eq!(schedule.timeline.len(), 5);
//! assert_eq!(schedule.outcome("P1").unwrap().finish(), 8);
//! ```

mod scheduler;

pub use crate::scheduler::{
    Outcome, Pid, Process, Schedule, Scheduler, SchedulingError, Segment,
};
pub use crate::schedulers::{
    ByBurst, ByPriority, Fcfs, Priority, ReadyQueue, RoundRobin, ShortestJobFirst, SortKey,
};

mod schedulers;

/// Returns a structure that implements the `Scheduler` trait with a first come first served policy
pub fn fcfs() -> impl Scheduler + Copy + Send + Sync {
    Fcfs
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive
/// shortest job first policy
///
/// Among the processes that have arrived, the one with the smallest burst runs next.
pub fn sjf() -> impl Scheduler + Copy + Send + Sync {
    ReadyQueue::new(ByBurst)
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive priority policy
///
/// Among the processes that have arrived, the one with the smallest priority value runs next.
pub fn priority() -> impl Scheduler + Copy + Send + Sync {
    ReadyQueue::new(ByPriority)
}

/// Returns a structure that implements the `Scheduler` trait with a round robin policy
///
/// * `quantum` - the time units that a process can run before it is preempted.
///               A quantum of 0 is rejected by [`Scheduler::schedule`].
pub fn round_robin(quantum: usize) -> impl Scheduler + Copy + Send + Sync {
    RoundRobin::new(quantum)
}
