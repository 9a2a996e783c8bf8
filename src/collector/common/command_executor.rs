// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Command execution for collector passes.
//
// Every pass receives a `CommandRunner` instead of spawning processes
// itself. Production code hands in a `SystemCommandRunner`; tests hand in a
// closure returning canned `sinfo`/`squeue` output.

use crate::collector::common::{CollectorError, CollectorResult};
use crate::common::config::ExporterConfig;
use crate::utils::run_command_with_timeout;
use std::io;
use std::time::Duration;

/// Options to control command execution behavior.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Deadline for the whole invocation.
    pub timeout: Duration,
    /// If true, non-zero exit statuses will return an error.
    pub check_status: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(ExporterConfig::DEFAULT_COMMAND_TIMEOUT_SECS),
            check_status: true,
        }
    }
}

/// Raw command output.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code (or -1 if unavailable)
    pub status: i32,
    /// Undecoded stdout
    pub stdout: Vec<u8>,
    /// UTF-8 (lossy) decoded stderr
    pub stderr: String,
}

/// Execute a command with the provided CommandOptions.
///
/// A timeout maps to `CollectorError::Timeout`. When `check_status` is set
/// and the exit code is non-zero, returns `CollectorError::CommandFailed`.
pub fn execute_command(
    command: &str,
    args: &[&str],
    options: &CommandOptions,
) -> CollectorResult<CommandOutput> {
    let output = run_command_with_timeout(command, args, options.timeout).map_err(|e| {
        if e.kind() == io::ErrorKind::TimedOut {
            CollectorError::Timeout(e.to_string())
        } else {
            CollectorError::Io(e)
        }
    })?;

    let status_code = output.status.code().unwrap_or(-1);
    let out = CommandOutput {
        status: status_code,
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };

    if options.check_status && status_code != 0 {
        return Err(CollectorError::CommandFailed {
            command: format!("{command} {}", args.join(" ")),
            code: Some(status_code),
            stderr: out.stderr,
        });
    }

    Ok(out)
}

/// Source of raw command output for a collector pass.
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `args` and return its stdout.
    fn run(&self, command: &str, args: &[&str]) -> CollectorResult<Vec<u8>>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str, &[&str]) -> CollectorResult<Vec<u8>> + Send + Sync,
{
    fn run(&self, command: &str, args: &[&str]) -> CollectorResult<Vec<u8>> {
        self(command, args)
    }
}

/// Runs the real Slurm binaries found on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    options: CommandOptions,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            options: CommandOptions {
                timeout,
                check_status: true,
            },
        }
    }

    pub fn timeout(&self) -> Duration {
        self.options.timeout
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &str, args: &[&str]) -> CollectorResult<Vec<u8>> {
        tracing::debug!("Executing {command} {}", args.join(" "));
        execute_command(command, args, &self.options).map(|out| out.stdout)
    }
}
