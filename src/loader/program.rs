/*!
 * Program Loader
 * Reads `<dir>/<pid>.txt` instruction files and validates every line
 */

use crate::core::errors::{LoadError, LoadResult};
use crate::core::types::Pid;
use crate::isa::decode;
use crate::process::Process;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a program body. Blank lines are dropped; the kept lines are returned verbatim.
pub fn parse_program(source: &str, path: &Path) -> LoadResult<Vec<String>> {
    let mut lines = Vec::new();

    for (i, text) in source.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        decode(text).map_err(|source| LoadError::InvalidInstruction {
            path: path.to_path_buf(),
            line: i + 1,
            text: text.to_string(),
            source,
        })?;
        lines.push(text.to_string());
    }

    Ok(lines)
}

/// Program file for one process
pub fn program_path(dir: &Path, pid: Pid) -> PathBuf {
    dir.join(format!("{}.txt", pid))
}

/// Load one program per process, in process order
pub fn load_programs(dir: impl AsRef<Path>, processes: &[Process]) -> LoadResult<Vec<Vec<String>>> {
    let dir = dir.as_ref();

    processes
        .iter()
        .map(|process| -> LoadResult<Vec<String>> {
            let path = program_path(dir, process.pid);
            let source = std::fs::read_to_string(&path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    LoadError::MissingProgram {
                        pid: process.pid,
                        path: path.clone(),
                    }
                } else {
                    LoadError::Io {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

            let program = parse_program(&source, &path)?;
            debug!(pid = process.pid, instructions = program.len(), "Program loaded");
            Ok(program)
        })
        .collect()
}
