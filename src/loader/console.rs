/*!
 * Interactive Loader
 * Reads processes and their programs from a line-oriented stream
 *
 * Processes come first, one per line, ended by a blank line. Then, for every process
 * in order, its instructions follow one per line, ended by `END`. End of input closes
 * whatever section is open.
 */

use super::process::parse_processes;
use super::program::parse_program;
use crate::core::errors::{LoadError, LoadResult};
use crate::process::Process;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Label used in place of a path for errors from an interactive stream
pub const STDIN_LABEL: &str = "<stdin>";

/// Program terminator line (case-insensitive, surrounding whitespace ignored)
pub const END_MARKER: &str = "END";

/// Read processes, then one program per process, writing prompts to `prompts`
pub fn read_workload<R, W>(
    mut reader: R,
    mut prompts: W,
) -> LoadResult<(Vec<Process>, Vec<Vec<String>>)>
where
    R: BufRead,
    W: Write,
{
    let _ = writeln!(
        prompts,
        "Enter one process per line, e.g. `PID: 1, AX=5, BX=3, Quantum=2`. Finish with an empty line."
    );
    let block = read_block(&mut reader, &mut prompts, "> ", |line| line.trim().is_empty())?;
    let processes = parse_processes(&block)?;
    if processes.is_empty() {
        return Err(LoadError::Empty(PathBuf::from(STDIN_LABEL)));
    }
    info!(count = processes.len(), "Processes read from input");

    let mut programs = Vec::with_capacity(processes.len());
    for process in &processes {
        let _ = writeln!(
            prompts,
            "[PID {}] Enter instructions, {} to finish:",
            process.pid, END_MARKER
        );
        let block = read_block(&mut reader, &mut prompts, "  > ", |line| {
            line.trim().eq_ignore_ascii_case(END_MARKER)
        })?;
        let program = parse_program(&block, Path::new(STDIN_LABEL))?;
        debug!(pid = process.pid, instructions = program.len(), "Program read from input");
        programs.push(program);
    }

    Ok((processes, programs))
}

/// Collect lines until `is_end` matches or input runs out. The terminator is not kept.
fn read_block<R, W, F>(reader: &mut R, prompts: &mut W, prompt: &str, is_end: F) -> LoadResult<String>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> bool,
{
    let mut block = String::new();
    let mut line = String::new();

    loop {
        let _ = write!(prompts, "{}", prompt);
        let _ = prompts.flush();

        line.clear();
        let read = reader.read_line(&mut line).map_err(|source| LoadError::Io {
            path: PathBuf::from(STDIN_LABEL),
            source,
        })?;
        if read == 0 {
            break;
        }

        let text = line.trim_end_matches(['\r', '\n']);
        if is_end(text) {
            break;
        }
        block.push_str(text);
        block.push('\n');
    }

    Ok(block)
}
