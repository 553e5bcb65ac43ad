/*!
 * Round-Robin Simulator - Main Entry Point
 *
 * Loads a workload, runs it to completion and prints the final state:
 * - process definitions from SIM_PROCESS_FILE or the first argument
 *   (`-` reads processes and programs interactively from stdin)
 * - programs from SIM_PROGRAM_DIR/<pid>.txt or the second argument
 */

use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;
use tracing::info;

use rr_simulator::report::{render_json, render_text, render_workload};
use rr_simulator::{init_tracing, RoundRobin, SimulatorConfig, Workload};

fn main() -> Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env().with_args(std::env::args().skip(1));
    info!(
        process_file = %config.process_file.display(),
        program_dir = %config.program_dir.display(),
        record_trace = config.scheduler.record_trace,
        "Simulator starting"
    );

    let Workload {
        mut processes,
        programs,
    } = if Workload::is_interactive(&config.process_file) {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            Workload::from_reader_with_prompts(stdin.lock(), std::io::stderr())?
        } else {
            Workload::from_reader(stdin.lock())?
        }
    } else {
        Workload::load(&config.process_file, &config.program_dir)?
    };

    if !config.report_json {
        let lens: Vec<usize> = programs.iter().map(Vec::len).collect();
        print!("{}", render_workload(&processes, &lens));
    }

    let report = RoundRobin::with_config(config.scheduler).schedule(&mut processes, &programs)?;

    if config.report_json {
        println!("{}", render_json(&processes, &report).into_diagnostic()?);
    } else {
        print!("{}", render_text(&processes, &report));
    }

    info!(run_id = %report.run_id, ticks = report.stats.ticks, "Simulation complete");
    Ok(())
}
