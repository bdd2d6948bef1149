//! A processor simulation library
//!
//! This is used for replaying the schedules computed by the [`scheduler`] crate
//! on a single CPU, one slice at a time, and for formatting the result.

use std::fmt::Display;

use scheduler::{Pid, Process, Schedule, Scheduler, SchedulingError, Segment};

/// The action the CPU takes at one step of the replay.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Run the process with PID `pid` from `start` for `duration` time units.
    Run {
        pid: Pid,
        start: usize,
        duration: usize,
    },

    /// No process is ready, the CPU stays idle from `start` for `duration` time units.
    Idle { start: usize, duration: usize },

    /// Every process has finished.
    Done { at: usize },
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Run {
                pid,
                start,
                duration,
            } => write!(f, "Run {} at {} for {}", pid, start, units(*duration)),
            Decision::Idle { start, duration } => {
                write!(f, "Idle at {} for {}", start, units(*duration))
            }
            Decision::Done { at } => write!(f, "Done at {}, no more processes", at),
        }
    }
}

fn units(count: usize) -> String {
    if count == 1 {
        String::from("1 unit")
    } else {
        format!("{} units", count)
    }
}

/// The state of a process that has arrived.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProcessState {
    /// The process waits for the CPU.
    Ready,

    /// The process holds the CPU.
    Running,

    /// The process has received its whole burst.
    Done,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Done => write!(f, "DONE"),
        }
    }
}

/// Information about a process state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    /// The process priority
    pub priority: i32,

    pub arrival: usize,

    pub burst: usize,

    /// The time units the process has run before this step.
    pub executed: usize,
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t\t{}\t{}\t{}\t{}",
            self.pid, self.state, self.priority, self.arrival, self.burst, self.executed
        )
    }
}

/// Replay iteration log
#[derive(Debug, Clone, PartialEq)]
pub struct Log {
    /// The action taken by the CPU.
    pub decision: Decision,

    /// The processes that have arrived when the action is taken,
    /// in the order they were given to the scheduler.
    pub processes: Vec<ProcessInfo>,
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.decision)?;
        writeln!(f, "PID\tSTATE\t\tPRI\tARRIVAL\tBURST\tEXECUTED")?;
        for process in &self.processes {
            writeln!(f, "{}", process)?;
        }
        writeln!(f)
    }
}

/// The outcome of [`Processor::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The name of the scheduler.
    pub name: String,

    /// One log for every step of the replay.
    pub logs: Vec<Log>,

    /// The schedule computed by the scheduler.
    pub schedule: Schedule,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====\n", self.name)?;
        for (iteration, log) in self.logs.iter().enumerate() {
            write!(f, "===== Iteration: {} =====\n{}\n", iteration + 1, log)?;
        }

        writeln!(f, "===== Summary =====")?;
        writeln!(f, "PID\tARRIVAL\tBURST\tPRI\tSTART\tWAITING\tTURNAROUND\tFINISH")?;
        for outcome in &self.schedule.outcomes {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t\t{}",
                outcome.pid(),
                outcome.arrival(),
                outcome.burst(),
                outcome.priority(),
                outcome.start(),
                outcome.waiting(),
                outcome.turnaround(),
                outcome.finish()
            )?;
        }
        writeln!(f, "AVERAGE WAITING\t\t{:.2}", self.schedule.average_waiting())?;
        writeln!(f, "AVERAGE TURNAROUND\t{:.2}", self.schedule.average_turnaround())?;
        writeln!(f, "MAKESPAN\t\t{}", self.schedule.makespan())?;
        writeln!(f, "IDLE\t\t\t{}", self.schedule.idle_time())
    }
}

/// The processor simulator.
///
/// The processor replays a timeline slice by slice and checks that it
/// is one a single CPU can execute: slices never overlap, a process never
/// runs before it arrives and every process receives exactly its burst.
pub struct Processor<'a> {
    processes: &'a [Process],
    executed: Vec<usize>,
    clock: usize,
    logs: Vec<Log>,
}

impl<'a> Processor<'a> {
    /// Compute the schedule of `processes` and replay it.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    /// * `processes` - the processes to schedule.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::Process;
    ///
    /// let processes = vec![
    ///     Process::new("P1", 0, 5, 0).unwrap(),
    ///     Process::new("P2", 1, 3, 0).unwrap(),
    /// ];
    /// let report = Processor::run(scheduler::round_robin(2), &processes).unwrap();
    ///
    /// // five slices and the final step
    /// assert_eq!(report.logs.len(), 6);
    /// ```
    pub fn run<S: Scheduler>(
        scheduler: S,
        processes: &'a [Process],
    ) -> Result<Report, SchedulingError> {
        let name = scheduler.name();
        let schedule = scheduler.schedule(processes)?;
        log::debug!("replaying {} slices of {}", schedule.timeline.len(), name);

        let mut processor = Processor {
            processes,
            executed: vec![0; processes.len()],
            clock: 0,
            logs: Vec::with_capacity(schedule.timeline.len() + 1),
        };
        for segment in &schedule.timeline {
            processor.execute(segment)?;
        }
        processor.finish()?;

        log::debug!("{} finished at {}", name, processor.clock);
        Ok(Report {
            name,
            logs: processor.logs,
            schedule,
        })
    }

    fn execute(&mut self, segment: &Segment) -> Result<(), SchedulingError> {
        let finish = segment.start.checked_add(segment.duration).ok_or_else(|| {
            SchedulingError::Internal(format!("slice of {} ends past the clock", segment.pid))
        })?;
        let index = self
            .processes
            .iter()
            .position(|process| process.pid() == &segment.pid)
            .ok_or_else(|| {
                SchedulingError::Internal(format!("slice {} of an unknown process", segment))
            })?;
        let process = &self.processes[index];

        if segment.start < self.clock {
            return Err(SchedulingError::Internal(format!(
                "slice {} starts before the CPU is free at {}",
                segment, self.clock
            )));
        }
        if segment.start < process.arrival() {
            return Err(SchedulingError::Internal(format!(
                "slice {} starts before {} arrives at {}",
                segment,
                process.pid(),
                process.arrival()
            )));
        }
        if segment.duration > process.burst() - self.executed[index] {
            return Err(SchedulingError::Internal(format!(
                "slice {} runs {} past its burst of {}",
                segment,
                process.pid(),
                process.burst()
            )));
        }

        if segment.start > self.clock {
            let decision = Decision::Idle {
                start: self.clock,
                duration: segment.start - self.clock,
            };
            self.record(decision, self.clock, None);
        }

        let decision = Decision::Run {
            pid: segment.pid.clone(),
            start: segment.start,
            duration: segment.duration,
        };
        self.record(decision, segment.start, Some(index));

        self.executed[index] += segment.duration;
        self.clock = finish;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SchedulingError> {
        for (process, executed) in self.processes.iter().zip(&self.executed) {
            if *executed != process.burst() {
                return Err(SchedulingError::Internal(format!(
                    "{} ran for {} of its burst of {}",
                    process.pid(),
                    executed,
                    process.burst()
                )));
            }
        }
        self.record(Decision::Done { at: self.clock }, self.clock, None);
        Ok(())
    }

    fn record(&mut self, decision: Decision, time: usize, running: Option<usize>) {
        let processes = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.arrival() <= time)
            .map(|(index, process)| {
                let state = if running == Some(index) {
                    ProcessState::Running
                } else if self.executed[index] == process.burst() {
                    ProcessState::Done
                } else {
                    ProcessState::Ready
                };
                ProcessInfo {
                    pid: process.pid().clone(),
                    state,
                    priority: process.priority(),
                    arrival: process.arrival(),
                    burst: process.burst(),
                    executed: self.executed[index],
                }
            })
            .collect();
        log::trace!("{}", decision);
        self.logs.push(Log {
            decision,
            processes,
        });
    }
}

/// Format a [`Report`] to a [`String`].
///
/// * `report` - the report returned by the [`Processor`].
///
/// ## Example
///
/// ```rust
/// use processor::{format_report, Processor};
/// use scheduler::Process;
///
/// let processes = vec![Process::new("P1", 0, 3, 0).unwrap()];
/// let report = Processor::run(scheduler::fcfs(), &processes).unwrap();
///
/// println!("{}", format_report(&report));
/// ```
pub fn format_report(report: &Report) -> String {
    report.to_string()
}
