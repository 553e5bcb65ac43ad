/*!
 * Scheduler Statistics
 * Per-run counters and the final run report
 */

use super::types::{TerminationReason, TraceEvent};
use crate::core::types::Pid;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Instructions executed
    pub ticks: u64,
    /// Turns handed out
    pub slices: u64,
    /// Slices that ended with the quantum exhausted
    pub preemptions: u64,
    /// Dispatches of a different process than the previous one
    pub context_switches: u64,
    pub terminations: u64,
    pub out_of_range_jumps: u64,
    pub decode_faults: u64,
    /// Processes found revisiting an address
    pub loops_detected: u64,
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} slices={} preemptions={} context_switches={} terminations={} out_of_range_jumps={} decode_faults={} loops_detected={}",
            self.ticks,
            self.slices,
            self.preemptions,
            self.context_switches,
            self.terminations,
            self.out_of_range_jumps,
            self.decode_faults,
            self.loops_detected
        )
    }
}

/// Per-process accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub ticks: u64,
    pub slices: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<TerminationReason>,
}

impl ProcessStats {
    pub(super) fn new(pid: Pid) -> Self {
        Self {
            pid,
            ticks: 0,
            slices: 0,
            termination: None,
        }
    }
}

/// Outcome of a completed simulation
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    /// False when the tick limit stopped the run early
    pub completed: bool,
    pub stats: SchedulerStats,
    /// In input order
    pub processes: Vec<ProcessStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEvent>,
}

impl RunReport {
    /// Stats for one process
    pub fn process_stats(&self, pid: Pid) -> Option<&ProcessStats> {
        self.processes.iter().find(|s| s.pid == pid)
    }

    /// PIDs in the order they were handed the CPU (requires a recorded trace)
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.trace
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Dispatched { pid, .. } => Some(*pid),
                _ => None,
            })
            .collect()
    }

    /// Ticks executed per slice for one process (requires a recorded trace)
    pub fn slice_lengths(&self, pid: Pid) -> Vec<u64> {
        let mut slices = Vec::new();
        for event in &self.trace {
            match event {
                TraceEvent::Dispatched { pid: p, .. } if *p == pid => slices.push(0),
                TraceEvent::Executed { pid: p, .. } if *p == pid => {
                    if let Some(last) = slices.last_mut() {
                        *last += 1;
                    }
                }
                _ => {}
            }
        }
        slices
    }
}
