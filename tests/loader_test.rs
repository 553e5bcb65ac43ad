/*!
 * Loader Tests
 * Process files and program directories on disk
 */

use pretty_assertions::assert_eq;
use rr_simulator::{schedule, LoadError, ProcessState, Registers, Workload};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

/// Temp dir with `processes.txt` and an `instr/` directory
fn workspace(processes: &str, programs: &[(u32, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "processes.txt", processes);
    fs::create_dir(dir.path().join("instr")).unwrap();
    for (pid, body) in programs {
        write(&dir.path().join("instr"), &format!("{pid}.txt"), body);
    }
    dir
}

#[test]
fn test_load_and_run_workload() {
    let dir = workspace(
        "PID: 1, AX=5, Quantum=2\nPID: 2, BX=1, CX=-3, Quantum=1\n",
        &[
            (1, "ADD AX, 3\nSUB AX, 1\n\nMUL AX, 2\n"),
            (2, "inc bx\nADD CX, BX\n"),
        ],
    );

    let mut workload =
        Workload::load(dir.path().join("processes.txt"), dir.path().join("instr")).unwrap();

    assert_eq!(workload.processes.len(), 2);
    assert_eq!(workload.processes[1].registers, Registers::new(0, 1, -3));
    assert_eq!(
        workload.programs[0],
        vec!["ADD AX, 3", "SUB AX, 1", "MUL AX, 2"]
    );
    assert_eq!(workload.programs[1], vec!["inc bx", "ADD CX, BX"]);

    let report = schedule(&mut workload.processes, &workload.programs).unwrap();

    assert!(report.completed);
    assert_eq!(report.dispatch_order(), vec![1, 2, 1, 2]);
    assert_eq!(workload.processes[0].registers.ax, 14);
    assert_eq!(workload.processes[1].registers, Registers::new(0, 2, -1));
    assert!(workload
        .processes
        .iter()
        .all(|p| p.state == ProcessState::Terminated));
}

#[test]
fn test_missing_process_file() {
    let dir = TempDir::new().unwrap();
    let err = Workload::load(dir.path().join("nope.txt"), dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_empty_process_file() {
    let dir = workspace("\n  \n", &[]);
    let err = Workload::load(dir.path().join("processes.txt"), dir.path().join("instr"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Empty(_)));
}

#[test]
fn test_missing_program_file() {
    let dir = workspace(
        "PID: 1, Quantum=1\nPID: 2, Quantum=1\n",
        &[(1, "NOP\n")],
    );
    let err = Workload::load(dir.path().join("processes.txt"), dir.path().join("instr"))
        .unwrap_err();
    match err {
        LoadError::MissingProgram { pid, path } => {
            assert_eq!(pid, 2);
            assert!(path.ends_with("2.txt"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_instruction_in_program() {
    let dir = workspace("PID: 3, Quantum=1\n", &[(3, "NOP\nINC AX\nJMP -2\n")]);
    let err = Workload::load(dir.path().join("processes.txt"), dir.path().join("instr"))
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidInstruction { line: 3, .. }));
    assert!(err.to_string().contains("JMP target cannot be negative"));
}

#[test]
fn test_malformed_process_line() {
    let dir = workspace("PID: 1, Quantum=1\nPID: two, Quantum=1\n", &[(1, "NOP")]);
    let err = Workload::load(dir.path().join("processes.txt"), dir.path().join("instr"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
}

#[test]
fn test_empty_program_file_is_allowed() {
    let dir = workspace("PID: 5, Quantum=4\n", &[(5, "\n\n")]);
    let mut workload =
        Workload::load(dir.path().join("processes.txt"), dir.path().join("instr")).unwrap();
    assert!(workload.programs[0].is_empty());

    let report = schedule(&mut workload.processes, &workload.programs).unwrap();
    assert_eq!(report.stats.ticks, 0);
    assert_eq!(workload.processes[0].state, ProcessState::Terminated);
}

#[test]
fn test_interactive_workload_from_reader() {
    let input = "\
PID: 1, AX=5, Quantum=10
PID: 2, Quantum=2

ADD AX, 3
SUB AX, 1
MUL AX, 2
END
INC BX
INC BX
INC BX
END
";
    let mut workload = Workload::from_reader(Cursor::new(input)).unwrap();
    assert_eq!(workload.programs[1].len(), 3);

    let report = schedule(&mut workload.processes, &workload.programs).unwrap();

    assert!(report.completed);
    assert_eq!(workload.processes[0].registers.ax, 14);
    assert_eq!(workload.processes[1].registers.bx, 3);
    assert_eq!(report.dispatch_order(), vec![1, 2, 2]);
}

#[test]
fn test_dash_selects_interactive_input() {
    assert!(Workload::is_interactive(Path::new("-")));
    assert!(!Workload::is_interactive(Path::new("processes.txt")));
}
