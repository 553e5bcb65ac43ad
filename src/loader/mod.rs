/*!
 * Workload Loader
 * Process definitions and their programs from disk or an interactive stream
 */

mod console;
mod process;
mod program;

pub use console::{read_workload, END_MARKER, STDIN_LABEL};
pub use process::{load_processes, parse_process_line, parse_processes};
pub use program::{load_programs, parse_program, program_path};

use crate::core::errors::LoadResult;
use crate::process::Process;
use std::io::{BufRead, Write};
use std::path::Path;

/// Process-file argument that selects interactive input
pub const INTERACTIVE_SOURCE: &str = "-";

/// Processes and their programs, indexed in parallel
#[derive(Debug, Clone)]
pub struct Workload {
    pub processes: Vec<Process>,
    pub programs: Vec<Vec<String>>,
}

impl Workload {
    /// Load the process file, then `<program_dir>/<pid>.txt` for each process
    pub fn load(process_file: impl AsRef<Path>, program_dir: impl AsRef<Path>) -> LoadResult<Self> {
        let processes = load_processes(process_file)?;
        let programs = load_programs(program_dir, &processes)?;
        Ok(Self {
            processes,
            programs,
        })
    }

    /// Read processes until a blank line, then each program until `END`. No prompts.
    pub fn from_reader(reader: impl BufRead) -> LoadResult<Self> {
        Self::from_reader_with_prompts(reader, std::io::sink())
    }

    /// Like `from_reader`, writing a prompt before every line read
    pub fn from_reader_with_prompts(reader: impl BufRead, prompts: impl Write) -> LoadResult<Self> {
        let (processes, programs) = read_workload(reader, prompts)?;
        Ok(Self {
            processes,
            programs,
        })
    }

    /// Whether a process-file argument asks for interactive input
    pub fn is_interactive(process_file: &Path) -> bool {
        process_file.as_os_str() == INTERACTIVE_SOURCE
    }
}
