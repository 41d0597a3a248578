//! Wrappers around the external programs driven by the harness.
//!
//! The reference encoder, the reorder utility and the simulation of the implementation under
//! test are all invoked as blocking child processes. None of them is reimplemented here.

mod emporda;
mod reorder;
mod simulator;
mod tool_check;

pub use emporda::*;
pub use reorder::*;
pub use simulator::*;
pub use tool_check::*;

use crate::error::{HarnessError, HarnessResult};
use std::io;
use std::process::{Command, Output};
use tracing::{debug, warn};

/// Runs `command` to completion, mapping a non-zero exit to [`HarnessError::ExternalTool`].
pub(crate) fn run_tool(tool: &str, command: &mut Command) -> HarnessResult<Output> {
    let output = spawn_output(tool, command)?;
    if output.status.success() {
        return Ok(output);
    }

    log_failure(tool, &output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = match stderr.lines().rev().find(|line| !line.trim().is_empty()) {
        Some(line) => format!("{}: {}", output.status, line.trim()),
        None => output.status.to_string(),
    };
    Err(HarnessError::ExternalTool {
        tool: tool.to_string(),
        reason,
    })
}

/// Runs `command` to completion and returns its output, whatever the exit status.
///
/// A program that cannot be started at all is reported as [`HarnessError::ToolNotFound`].
pub(crate) fn spawn_output(tool: &str, command: &mut Command) -> HarnessResult<Output> {
    debug!(tool, ?command, "running external tool");
    command.output().map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => HarnessError::ToolNotFound {
            tool: tool.to_string(),
            source,
        },
        _ => HarnessError::Io(source),
    })
}

pub(crate) fn log_failure(tool: &str, output: &Output) {
    warn!(
        tool,
        status = %output.status,
        stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
        stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
        "external tool failed"
    );
}
