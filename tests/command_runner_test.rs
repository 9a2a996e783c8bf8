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

//! `SystemCommandRunner` against stand-in shell scripts.

use std::path::Path;
use std::time::Duration;

use slurm_exporter::collector::common::{
    CollectorError, CollectorResult, CommandRunner, SystemCommandRunner,
};
use slurm_exporter::collector::cpus;
use tempfile::TempDir;

/// Write `body` as `<dir>/<name>` and return a runner that executes it
/// through `sh` whenever `name` is requested.
fn script_runner(
    dir: &Path,
    name: &'static str,
    body: &str,
    timeout: Duration,
) -> impl Fn(&str, &[&str]) -> CollectorResult<Vec<u8>> + Send + Sync {
    let script = dir.join(name);
    std::fs::write(&script, body).unwrap();
    let script = script.to_string_lossy().into_owned();
    let system = SystemCommandRunner::new(timeout);

    move |command: &str, args: &[&str]| {
        assert_eq!(command, name);
        let mut full = vec![script.as_str()];
        full.extend_from_slice(args);
        system.run("sh", &full)
    }
}

#[test]
fn test_fake_sinfo_feeds_cpus_pass() {
    let dir = TempDir::new().unwrap();
    let runner = script_runner(
        dir.path(),
        "sinfo",
        "#!/bin/sh\necho '5725/877/34/6636'\n",
        Duration::from_secs(5),
    );

    let cpus = cpus::cpus_get_metrics(&runner).unwrap();
    assert_eq!(cpus.alloc, 5725.0);
    assert_eq!(cpus.total, 6636.0);
}

#[test]
fn test_fake_sinfo_receives_arguments() {
    let dir = TempDir::new().unwrap();
    let runner = script_runner(
        dir.path(),
        "sinfo",
        "#!/bin/sh\necho \"$@\"\n",
        Duration::from_secs(5),
    );

    let out = runner.run("sinfo", &["-h", "-o", "%C"]).unwrap();
    assert_eq!(String::from_utf8_lossy(&out).trim(), "-h -o %C");
}

#[test]
fn test_non_zero_exit_is_command_failure() {
    let dir = TempDir::new().unwrap();
    let runner = script_runner(
        dir.path(),
        "squeue",
        "#!/bin/sh\necho 'slurm_load_jobs error: Unable to contact slurm controller' >&2\nexit 1\n",
        Duration::from_secs(5),
    );

    match runner.run("squeue", &["-h"]).unwrap_err() {
        CollectorError::CommandFailed { code, stderr, .. } => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("Unable to contact slurm controller"));
        }
        other => panic!("expected CommandFailed, got {other}"),
    }
}

#[test]
fn test_slow_command_times_out() {
    let dir = TempDir::new().unwrap();
    let runner = script_runner(
        dir.path(),
        "sdiag",
        "#!/bin/sh\nexec sleep 5\n",
        Duration::from_millis(200),
    );

    let err = runner.run("sdiag", &[]).unwrap_err();
    assert!(matches!(err, CollectorError::Timeout(_)));
}

#[test]
fn test_missing_binary_is_io_error() {
    let runner = SystemCommandRunner::new(Duration::from_secs(1));
    let err = runner
        .run("definitely-not-a-slurm-binary", &[])
        .unwrap_err();
    assert!(matches!(err, CollectorError::Io(_)));
}
