use std::collections::HashSet;
use std::error::Error;
use std::fmt::{self, Display};

/// The identifier of a process, such as `P3`.
///
/// A PID is never empty.
#[derive(PartialEq, Eq, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(String);

impl Pid {
    pub fn new(pid: &str) -> Result<Pid, SchedulingError> {
        if pid.is_empty() {
            return Err(SchedulingError::EmptyPid);
        }
        Ok(Pid(pid.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Pid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process that asks for CPU time.
///
/// Processes are immutable once built, every scheduler only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    pid: Pid,
    arrival: usize,
    burst: usize,
    priority: i32,
}

impl Process {
    /// Build a process.
    ///
    /// * `pid` - the process identifier, must not be empty.
    /// * `arrival` - the time unit at which the process becomes ready.
    /// * `burst` - the number of time units the process needs, at least 1.
    /// * `priority` - the process priority, a smaller value is more urgent.
    pub fn new(
        pid: &str,
        arrival: usize,
        burst: usize,
        priority: i32,
    ) -> Result<Process, SchedulingError> {
        let pid = Pid::new(pid)?;
        if burst == 0 {
            return Err(SchedulingError::ZeroBurst(pid));
        }
        Ok(Process {
            pid,
            arrival,
            burst,
            priority,
        })
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn arrival(&self) -> usize {
        self.arrival
    }

    pub fn burst(&self) -> usize {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// The timings computed for one process once it has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pid: Pid,
    arrival: usize,
    burst: usize,
    priority: i32,
    start: usize,
    finish: usize,
    waiting: usize,
    turnaround: usize,
}

impl Outcome {
    /// Build the outcome of `process`, whose last slice ran from `start`
    /// to `finish`.
    pub(crate) fn new(
        process: &Process,
        start: usize,
        finish: usize,
    ) -> Result<Outcome, SchedulingError> {
        if start < process.arrival
            || finish <= start
            || finish - process.arrival < process.burst
        {
            return Err(SchedulingError::Internal(format!(
                "process {} arrived at {} with burst {} cannot run from {} to {}",
                process.pid, process.arrival, process.burst, start, finish
            )));
        }
        let turnaround = finish - process.arrival;
        Ok(Outcome {
            pid: process.pid.clone(),
            arrival: process.arrival,
            burst: process.burst,
            priority: process.priority,
            start,
            finish,
            waiting: turnaround - process.burst,
            turnaround,
        })
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn arrival(&self) -> usize {
        self.arrival
    }

    pub fn burst(&self) -> usize {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The time the last slice of the process started.
    ///
    /// For the non-preemptive policies this is the only dispatch.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The time the process completed.
    pub fn finish(&self) -> usize {
        self.finish
    }

    /// The time the process spent ready but not running.
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// The time between arrival and completion.
    pub fn turnaround(&self) -> usize {
        self.turnaround
    }
}

/// A slice of CPU time given to a process.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub pid: Pid,
    pub start: usize,
    pub duration: usize,
}

impl Segment {
    pub fn new(pid: Pid, start: usize, duration: usize) -> Segment {
        Segment {
            pid,
            start,
            duration,
        }
    }

    pub fn finish(&self) -> usize {
        self.start + self.duration
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{},{}]", self.pid, self.start, self.finish())
    }
}

/// The result of running a [`Scheduler`] over a set of processes.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// One outcome for every process, in completion order.
    pub outcomes: Vec<Outcome>,

    /// Every slice of CPU time, in dispatch order.
    pub timeline: Vec<Segment>,
}

impl Schedule {
    /// Build a schedule for a non-preemptive policy, where every
    /// process runs in a single slice.
    pub(crate) fn from_outcomes(outcomes: Vec<Outcome>) -> Schedule {
        let timeline = outcomes
            .iter()
            .map(|outcome| Segment::new(outcome.pid.clone(), outcome.start, outcome.burst))
            .collect();
        Schedule { outcomes, timeline }
    }

    pub fn outcome(&self, pid: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|outcome| outcome.pid == pid)
    }

    pub fn segments_of<'a>(&'a self, pid: &'a str) -> impl Iterator<Item = &'a Segment> + 'a {
        self.timeline.iter().filter(move |segment| segment.pid == pid)
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(Outcome::waiting)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(Outcome::turnaround)
    }

    /// The time at which the last slice ends.
    pub fn makespan(&self) -> usize {
        self.timeline
            .iter()
            .map(Segment::finish)
            .max()
            .unwrap_or(0)
    }

    /// The time the CPU spent without a process, counted from 0.
    pub fn idle_time(&self) -> usize {
        let busy: usize = self.timeline.iter().map(|segment| segment.duration).sum();
        self.makespan().saturating_sub(busy)
    }

    /// The share of the makespan the CPU was busy, between 0 and 1.
    pub fn cpu_utilization(&self) -> f64 {
        let makespan = self.makespan();
        if makespan == 0 {
            return 0.0;
        }
        (makespan - self.idle_time()) as f64 / makespan as f64
    }

    fn average(&self, metric: fn(&Outcome) -> usize) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .outcomes
            .iter()
            .map(|outcome| metric(outcome) as f64)
            .sum();
        total / self.outcomes.len() as f64
    }
}

/// The errors returned by the schedulers.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulingError {
    /// There is nothing to schedule.
    NoProcesses,

    /// A process was given an empty identifier.
    EmptyPid,

    /// Two processes share the same identifier.
    DuplicatePid(Pid),

    /// A process does not need any CPU time.
    ZeroBurst(Pid),

    /// The round robin quantum is 0.
    InvalidQuantum(usize),

    /// The processes would not all finish before `usize::MAX`.
    TimeOverflow,

    /// The scheduler reached a state that should not be possible.
    Internal(String),
}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::NoProcesses => write!(f, "no processes to schedule"),
            SchedulingError::EmptyPid => write!(f, "process identifier is empty"),
            SchedulingError::DuplicatePid(pid) => {
                write!(f, "process {} is listed more than once", pid)
            }
            SchedulingError::ZeroBurst(pid) => {
                write!(f, "process {} has a burst of 0", pid)
            }
            SchedulingError::InvalidQuantum(quantum) => {
                write!(f, "invalid quantum {}, must be at least 1", quantum)
            }
            SchedulingError::TimeOverflow => {
                write!(f, "the processes do not fit in the time range")
            }
            SchedulingError::Internal(reason) => write!(f, "internal error: {}", reason),
        }
    }
}

impl Error for SchedulingError {}

/// The trait that every scheduling policy implements.
pub trait Scheduler {
    /// Returns the name of the policy, used in reports.
    fn name(&self) -> String;

    /// Computes the schedule of `processes`.
    ///
    /// The input is checked first, an invalid input never
    /// produces a partial schedule.
    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError>;
}

/// Check that `processes` can be scheduled.
///
/// `Process::new` already rejects empty identifiers and zero bursts,
/// the remaining checks are on the list as a whole.
///
/// No policy leaves the CPU idle once every process has arrived, so
/// every time a scheduler computes is at most the latest arrival plus
/// the sum of the bursts. Checking that sum here lets the policies add
/// times without overflow checks.
pub(crate) fn validate(processes: &[Process]) -> Result<(), SchedulingError> {
    if processes.is_empty() {
        log::warn!("refusing to schedule an empty process list");
        return Err(SchedulingError::NoProcesses);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if !seen.insert(&process.pid) {
            log::warn!("process {} is listed more than once", process.pid);
            return Err(SchedulingError::DuplicatePid(process.pid.clone()));
        }
    }

    let latest = processes.iter().map(Process::arrival).max().unwrap_or(0);
    let end = processes
        .iter()
        .try_fold(latest, |time, process| time.checked_add(process.burst));
    if end.is_none() {
        log::warn!("processes arriving up to {} overflow the clock", latest);
        return Err(SchedulingError::TimeOverflow);
    }
    Ok(())
}
