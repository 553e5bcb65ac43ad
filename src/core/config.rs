/*!
 * Simulator Configuration
 *
 * Defaults, environment overrides and positional CLI arguments
 */

use crate::scheduler::SchedulerConfig;
use std::path::PathBuf;

/// Process definition file
pub const ENV_PROCESS_FILE: &str = "SIM_PROCESS_FILE";
/// Directory holding `<pid>.txt` programs
pub const ENV_PROGRAM_DIR: &str = "SIM_PROGRAM_DIR";
/// Record the per-tick trace
pub const ENV_RECORD_TRACE: &str = "SIM_RECORD_TRACE";
/// Print the final report as JSON
pub const ENV_REPORT_JSON: &str = "SIM_REPORT_JSON";
/// Tick budget per run, `0` for unlimited
pub const ENV_TICK_LIMIT: &str = "SIM_TICK_LIMIT";
/// Cap on recorded trace events, `0` for unlimited
pub const ENV_TRACE_LIMIT: &str = "SIM_TRACE_LIMIT";
/// Terminate processes detected as looping
pub const ENV_TERMINATE_LOOPS: &str = "SIM_TERMINATE_LOOPS";
/// JSON log output (read by `init_tracing`)
pub const ENV_TRACE_JSON: &str = "SIM_TRACE_JSON";

const DEFAULT_PROCESS_FILE: &str = "processes.txt";
const DEFAULT_PROGRAM_DIR: &str = "instr";

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub process_file: PathBuf,
    pub program_dir: PathBuf,
    pub scheduler: SchedulerConfig,
    pub report_json: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            process_file: PathBuf::from(DEFAULT_PROCESS_FILE),
            program_dir: PathBuf::from(DEFAULT_PROGRAM_DIR),
            scheduler: SchedulerConfig::default(),
            report_json: false,
        }
    }
}

impl SimulatorConfig {
    /// Defaults overridden by `SIM_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(ENV_PROCESS_FILE) {
            config.process_file = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var(ENV_PROGRAM_DIR) {
            config.program_dir = PathBuf::from(dir);
        }
        config.scheduler.record_trace = env_flag(ENV_RECORD_TRACE, config.scheduler.record_trace);
        config.report_json = env_flag(ENV_REPORT_JSON, config.report_json);
        if let Some(limit) = env_number::<u64>(ENV_TICK_LIMIT) {
            config.scheduler.tick_limit = (limit > 0).then_some(limit);
        }
        if let Some(limit) = env_number::<usize>(ENV_TRACE_LIMIT) {
            config.scheduler.trace_limit = (limit > 0).then_some(limit);
        }
        config.scheduler.terminate_loops =
            env_flag(ENV_TERMINATE_LOOPS, config.scheduler.terminate_loops);

        config
    }

    /// Apply positional arguments: `[PROCESS_FILE] [PROGRAM_DIR]`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        if let Some(path) = args.next() {
            self.process_file = PathBuf::from(path);
        }
        if let Some(dir) = args.next() {
            self.program_dir = PathBuf::from(dir);
        }
        self
    }
}

/// Read a boolean environment variable, keeping `default` when unset or unrecognized
pub fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
