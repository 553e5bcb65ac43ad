/*!
 * Process Definition Loader
 * Parses `PID: <num> [, AX=<int>][, BX=<int>][, CX=<int>] , Quantum=<num>` lines
 */

use crate::core::errors::{LoadError, LoadResult};
use crate::core::types::{Pid, Quantum, Word};
use crate::process::{Process, Registers};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*PID:\s*([0-9]+)((?:\s*,\s*(?:AX|BX|CX)\s*=\s*-?[0-9]+)*)\s*,\s*Quantum\s*=\s*([0-9]+)\s*$")
            .expect("process line pattern is valid")
    })
}

fn register_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(AX|BX|CX)\s*=\s*(-?[0-9]+)").expect("register pattern is valid")
    })
}

/// Parse one process definition line (1-based `line` for error reporting)
pub fn parse_process_line(text: &str, line: usize) -> LoadResult<Process> {
    let syntax = || LoadError::Syntax {
        line,
        text: text.to_string(),
    };
    let invalid = |reason: String| LoadError::InvalidProcess { line, reason };

    let caps = line_pattern().captures(text).ok_or_else(syntax)?;

    let pid: Pid = caps[1]
        .parse()
        .map_err(|_| invalid(format!("PID out of range: {}", &caps[1])))?;
    if pid == 0 {
        return Err(invalid("PID must be positive".to_string()));
    }

    let quantum: Quantum = caps[3]
        .parse()
        .map_err(|_| invalid(format!("Quantum out of range: {}", &caps[3])))?;
    if quantum == 0 {
        return Err(invalid("Quantum must be at least 1".to_string()));
    }

    let mut registers = Registers::default();
    for reg in register_pattern().captures_iter(&caps[2]) {
        let value: Word = reg[2]
            .parse()
            .map_err(|_| invalid(format!("{} value out of range: {}", &reg[1], &reg[2])))?;
        match &reg[1] {
            "AX" => registers.ax = value,
            "BX" => registers.bx = value,
            _ => registers.cx = value,
        }
    }

    Ok(Process::with_registers(pid, registers, quantum))
}

/// Parse a whole process file body. Blank lines are skipped; PIDs must be unique.
pub fn parse_processes(source: &str) -> LoadResult<Vec<Process>> {
    let mut processes = Vec::new();
    let mut seen = HashSet::new();

    for (i, text) in source.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let process = parse_process_line(text, i + 1)?;
        if !seen.insert(process.pid) {
            return Err(LoadError::InvalidProcess {
                line: i + 1,
                reason: format!("duplicate PID {}", process.pid),
            });
        }
        debug!(pid = process.pid, quantum = process.quantum, "Parsed process");
        processes.push(process);
    }

    Ok(processes)
}

/// Load processes from a file; an empty file is an error
pub fn load_processes(path: impl AsRef<Path>) -> LoadResult<Vec<Process>> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let processes = parse_processes(&source)?;
    if processes.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    info!(path = %path.display(), count = processes.len(), "Processes loaded");
    Ok(processes)
}
