/*!
 * Scheduler Core Operations
 * Input validation and the round-robin quantum loop
 */

use super::queue::ReadyQueue;
use super::stats::{ProcessStats, RunReport, SchedulerStats};
use super::types::{ContextSnapshot, SchedulerConfig, TerminationReason, TraceEvent};
use super::RoundRobin;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::Pid;
use crate::execution::{execute, Effect, Flow};
use crate::isa::Program;
use crate::monitoring::span_run;
use crate::process::{Process, ProcessState};
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

impl RoundRobin {
    /// Run every process to completion.
    ///
    /// `programs[i]` is the program of `processes[i]`. Processes are mutated in place.
    /// When the report is `completed`, every process is `Terminated`; if the tick limit
    /// stopped the run, the unfinished ones are left `Ready`. Structural problems are
    /// rejected before any process is touched.
    pub fn schedule<P: Program>(
        &self,
        processes: &mut [Process],
        programs: &[P],
    ) -> SchedulerResult<RunReport> {
        let index = validate(processes, programs)?;

        let run_id = Uuid::new_v4();
        let span = span_run(run_id, processes.len());
        let _entered = span.enter();

        let mut run = Run::new(run_id, self.config, processes);
        let mut ready = ReadyQueue::with_capacity(processes.len());

        for (idx, process) in processes.iter_mut().enumerate() {
            let len = programs[idx].len();
            if process.pc < len {
                process.set_state(ProcessState::Ready);
                ready.push_back(process.pid);
                run.record(TraceEvent::Enqueued { pid: process.pid });
            } else {
                if process.pc > len {
                    warn!(
                        pid = process.pid,
                        pc = process.pc,
                        program_len = len,
                        "program counter past end of program, clamping"
                    );
                    process.pc = len;
                }
                let reason = if len == 0 {
                    TerminationReason::EmptyProgram
                } else {
                    TerminationReason::Completed
                };
                run.terminate(idx, process, reason);
            }
        }

        info!(ready = ready.len(), queue = %ready, "Initial ready queue built");

        // Input index of the process that held the CPU last
        let mut previous: Option<usize> = None;
        while let Some(&pid) = ready.front() {
            if let Some(limit) = self.config.tick_limit.filter(|&l| run.stats.ticks >= l) {
                warn!(limit, unfinished = ready.len(), queue = %ready, "Tick limit reached, stopping run");
                run.record(TraceEvent::TickLimitReached {
                    ticks: run.stats.ticks,
                    unfinished: ready.len(),
                });
                run.completed = false;
                break;
            }
            ready.pop_front();
            let Some(&idx) = index.get(&pid) else {
                // Only validated PIDs are ever enqueued.
                continue;
            };

            if let Some(prev) = previous.filter(|&prev| prev != idx) {
                run.stats.context_switches += 1;
                let saved = ContextSnapshot::from(&processes[prev]);
                let loaded = ContextSnapshot::from(&processes[idx]);
                debug!(saved = %saved, loaded = %loaded, "Context switch");
                run.record(TraceEvent::ContextSwitch { saved, loaded });
            }
            previous = Some(idx);

            let process = &mut processes[idx];
            let len = programs[idx].len();
            let outcome = match run.slice(idx, process, &programs[idx]) {
                Some(reason) => Some(reason),
                None => run.check_loop(idx, process, len),
            };
            match outcome {
                Some(reason) => run.terminate(idx, process, reason),
                None => {
                    process.set_state(ProcessState::Ready);
                    ready.push_back(pid);
                    run.stats.preemptions += 1;
                    run.record_with(|| TraceEvent::Preempted {
                        pid,
                        pc: process.pc,
                        queue: ready.iter().copied().collect(),
                    });
                    debug!(pid, pc = process.pc, queue = %ready, "Quantum exhausted, requeued");
                }
            }
        }

        info!(stats = %run.stats, "Scheduling complete");
        Ok(run.finish())
    }
}

/// Reject structural mismatches and build the PID index
fn validate<P: Program>(
    processes: &[Process],
    programs: &[P],
) -> SchedulerResult<HashMap<Pid, usize>> {
    if processes.len() != programs.len() {
        return Err(SchedulerError::LengthMismatch {
            processes: processes.len(),
            programs: programs.len(),
        });
    }

    let mut index = HashMap::with_capacity(processes.len());
    for (idx, process) in processes.iter().enumerate() {
        if process.pid == 0 {
            return Err(SchedulerError::InvalidPid(process.pid));
        }
        if process.quantum == 0 {
            return Err(SchedulerError::InvalidQuantum {
                pid: process.pid,
                quantum: process.quantum,
            });
        }
        if index.insert(process.pid, idx).is_some() {
            return Err(SchedulerError::DuplicatePid(process.pid));
        }
    }

    Ok(index)
}

/// Mutable bookkeeping for a single run
struct Run {
    run_id: Uuid,
    config: SchedulerConfig,
    stats: SchedulerStats,
    per_process: Vec<ProcessStats>,
    trace: Vec<TraceEvent>,
    trace_full: bool,
    /// Processes already reported as looping
    looping: Vec<bool>,
    completed: bool,
}

impl Run {
    fn new(run_id: Uuid, config: SchedulerConfig, processes: &[Process]) -> Self {
        Self {
            run_id,
            config,
            stats: SchedulerStats::default(),
            per_process: processes.iter().map(|p| ProcessStats::new(p.pid)).collect(),
            trace: Vec::new(),
            trace_full: false,
            looping: vec![false; processes.len()],
            completed: true,
        }
    }

    #[inline]
    fn record(&mut self, event: TraceEvent) {
        self.record_with(|| event);
    }

    /// Record an event built only when it will be kept
    fn record_with(&mut self, event: impl FnOnce() -> TraceEvent) {
        if !self.config.record_trace || self.trace_full {
            return;
        }
        match self.config.trace_limit {
            Some(limit) if self.trace.len() >= limit => {
                self.trace_full = true;
                self.trace.push(TraceEvent::TraceTruncated { limit });
                warn!(limit, "Trace limit reached, later events are not recorded");
            }
            _ => self.trace.push(event()),
        }
    }

    /// Next-pc depends only on the current pc, so more ticks than instructions
    /// means an address repeated and the process can never finish.
    fn check_loop(
        &mut self,
        idx: usize,
        process: &Process,
        len: usize,
    ) -> Option<TerminationReason> {
        let ticks = self.per_process[idx].ticks;
        if self.looping[idx] || ticks <= len as u64 {
            return None;
        }
        self.looping[idx] = true;
        self.stats.loops_detected += 1;
        warn!(pid = process.pid, pc = process.pc, ticks, program_len = len, "Process is looping");
        self.record(TraceEvent::LoopDetected {
            pid: process.pid,
            pc: process.pc,
            ticks,
        });
        self.config
            .terminate_loops
            .then_some(TerminationReason::Looping)
    }

    /// Run one turn. Returns the termination reason if the process finished.
    fn slice<P: Program>(
        &mut self,
        idx: usize,
        process: &mut Process,
        program: &P,
    ) -> Option<TerminationReason> {
        let len = program.len();
        let pid = process.pid;

        process.set_state(ProcessState::Running);
        self.stats.slices += 1;
        self.per_process[idx].slices += 1;
        self.record(TraceEvent::Dispatched {
            pid,
            pc: process.pc,
            quantum: process.quantum,
        });
        debug!(pid, pc = process.pc, quantum = process.quantum, registers = ?process.registers, "Dispatched");

        let mut remaining = process.quantum;
        let mut reason = None;

        while remaining > 0 && process.pc < len {
            let address = process.pc;
            let instruction = match program.fetch(address) {
                Ok(instruction) => instruction,
                Err(error) => {
                    warn!(pid, address, error = %error, "Undecodable instruction, terminating process");
                    self.stats.decode_faults += 1;
                    self.record(TraceEvent::Faulted {
                        pid,
                        address,
                        error: error.to_string(),
                    });
                    process.pc = len;
                    return Some(TerminationReason::DecodeFault);
                }
            };

            let step = execute(process, &instruction, len);
            remaining -= 1;
            self.stats.ticks += 1;
            self.per_process[idx].ticks += 1;
            trace!(pid, address, instruction = %instruction, effect = ?step.effect, remaining, "Tick");
            self.record(TraceEvent::Executed {
                pid,
                address,
                instruction,
                effect: step.effect,
                remaining,
            });

            if let Effect::JumpOutOfRange { .. } = step.effect {
                self.stats.out_of_range_jumps += 1;
                reason = Some(TerminationReason::JumpOutOfRange);
            }
            if step.flow == Flow::Halt {
                return Some(TerminationReason::Halted);
            }
        }

        if process.pc >= len {
            Some(reason.unwrap_or(TerminationReason::Completed))
        } else {
            None
        }
    }

    fn terminate(&mut self, idx: usize, process: &mut Process, reason: TerminationReason) {
        process.set_state(ProcessState::Terminated);
        self.stats.terminations += 1;
        self.per_process[idx].termination = Some(reason);
        self.record(TraceEvent::Terminated {
            pid: process.pid,
            pc: process.pc,
            reason,
        });
        info!(pid = process.pid, pc = process.pc, reason = %reason, "Process terminated");
    }

    fn finish(self) -> RunReport {
        RunReport {
            run_id: self.run_id,
            completed: self.completed,
            stats: self.stats,
            processes: self.per_process,
            trace: self.trace,
        }
    }
}
