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

//! Fixture-backed command runner shared by the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use slurm_exporter::collector::common::{CollectorError, CollectorResult};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Map a Slurm invocation to the fixture holding its canned output.
pub fn fixture_for(command: &str, args: &[&str]) -> Option<&'static str> {
    let has = |arg: &str| args.contains(&arg);
    let name = match command {
        "squeue" if has("%A|%a|%T|%C") => "squeue_accounts.txt",
        "squeue" if has("%A|%u|%T|%C") => "squeue_users.txt",
        "squeue" if has("%A,%T,%r") => "squeue_queue.txt",
        "squeue" if has("--states=PENDING") => "squeue_partition_pending.txt",
        "squeue" if has("--states=RUNNING") => "squeue_partition_running.txt",
        "sinfo" if has("-N") => "sinfo_node.txt",
        "sinfo" if has("%D|%T|%b") => "sinfo_nodes.txt",
        "sinfo" if has("%R,%C") => "sinfo_partitions_cpu.txt",
        "sinfo" if has("%C") => "sinfo_cpus.txt",
        "sinfo" if has("--Format=Nodes: ,Partition: ,Gres: ,GresUsed:") => {
            "sinfo_partitions_gpu.txt"
        }
        "sinfo" if has("--Format=Nodes: ,GresUsed:") => "sinfo_gpus_allocated.txt",
        "sinfo" if has("--Format=Nodes: ,Gres: ") => "sinfo_gpus_total.txt",
        "sinfo" if has("--Format=Nodes: ,Gres: ,GresUsed:") => "sinfo_gpus_idle.txt",
        "scontrol" => "scontrol_licenses.txt",
        "sdiag" => "sdiag.txt",
        _ => return None,
    };
    Some(name)
}

/// Runner that answers every known Slurm invocation from `tests/data`.
pub fn fixture_runner(command: &str, args: &[&str]) -> CollectorResult<Vec<u8>> {
    let name = fixture_for(command, args).ok_or_else(|| {
        CollectorError::Other(format!("unhandled command: {command} {}", args.join(" ")))
    })?;
    Ok(std::fs::read(fixture_path(name))?)
}

/// Same as [`fixture_runner`] except that `failing` always errors.
pub fn failing_runner(
    failing: &'static str,
) -> impl Fn(&str, &[&str]) -> CollectorResult<Vec<u8>> + Send + Sync {
    move |command: &str, args: &[&str]| {
        if command == failing {
            return Err(CollectorError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
                stderr: "slurm_load_partitions: Unable to contact slurm controller".to_string(),
            });
        }
        fixture_runner(command, args)
    }
}
