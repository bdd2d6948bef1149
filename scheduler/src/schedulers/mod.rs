//! The scheduling policies.
//!
//! Every policy lives in its own file and is exported here.
//! SJF and Priority share the ready queue scheduler and only
//! differ in the key used to pick the next process.
//!
mod fcfs;
pub use fcfs::Fcfs;

mod ready_queue;
pub use ready_queue::{ByBurst, ByPriority, Priority, ReadyQueue, ShortestJobFirst, SortKey};

mod round_robin;
pub use round_robin::RoundRobin;
