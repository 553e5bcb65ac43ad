/*!
 * Run Reporting
 * Text and JSON rendering of a finished simulation
 */

use crate::process::Process;
use crate::scheduler::RunReport;
use serde::Serialize;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn rule(out: &mut String, ch: char) {
    out.extend(std::iter::repeat(ch).take(RULE_WIDTH));
    out.push('\n');
}

/// Listing of processes with their program sizes, before the run
pub fn render_workload(processes: &[Process], program_lens: &[usize]) -> String {
    let mut out = String::new();
    rule(&mut out, '=');
    out.push_str("LOADED PROCESSES\n");
    rule(&mut out, '-');
    for (process, len) in processes.iter().zip(program_lens) {
        let _ = writeln!(out, "  {} | Instructions={}", process, len);
    }
    rule(&mut out, '=');
    out
}

/// Trace, final process states and run statistics
pub fn render_text(processes: &[Process], report: &RunReport) -> String {
    let mut out = String::new();

    if !report.trace.is_empty() {
        out.push_str("TRACE\n");
        rule(&mut out, '.');
        for event in &report.trace {
            let _ = writeln!(out, "{}", event);
        }
        rule(&mut out, '.');
    }

    out.push_str("FINAL PROCESS STATES\n");
    rule(&mut out, '-');
    for process in processes {
        let _ = write!(out, "  {}", process);
        match report.process_stats(process.pid) {
            Some(stats) => {
                let _ = write!(out, " | ticks={} slices={}", stats.ticks, stats.slices);
                if let Some(reason) = stats.termination {
                    let _ = write!(out, " ({})", reason);
                }
                out.push('\n');
            }
            None => out.push('\n'),
        }
    }
    rule(&mut out, '-');
    let _ = writeln!(out, "run {} | {}", report.run_id, report.stats);
    if !report.completed {
        out.push_str("run stopped at the tick limit; unfinished processes remain ready\n");
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    /// Final register, pc and state snapshots; `processes` holds the per-process stats
    final_states: &'a [Process],
    #[serde(flatten)]
    report: &'a RunReport,
}

/// Final states plus the run report as pretty JSON
pub fn render_json(processes: &[Process], report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        final_states: processes,
        report,
    })
}
