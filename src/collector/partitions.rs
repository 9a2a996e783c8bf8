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

//! Per-partition CPU, GPU and job counts, merged from four Slurm queries.

use std::collections::BTreeMap;

use crate::collector::common::parsers::{parse_gres_gpu_count, CpuState};
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{
    delimited_fields, non_empty_lines, parse_f64_or_zero, whitespace_fields,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionMetrics {
    pub cpu_allocated: f64,
    pub cpu_idle: f64,
    pub cpu_other: f64,
    pub cpu_total: f64,
    pub gpu_idle: f64,
    pub gpu_allocated: f64,
    pub jobs_pending: f64,
    pub jobs_running: f64,
}

/// Which job counter a `%P` listing feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionJobState {
    Pending,
    Running,
}

impl PartitionJobState {
    fn squeue_filter(self) -> &'static str {
        match self {
            PartitionJobState::Pending => "--states=PENDING",
            PartitionJobState::Running => "--states=RUNNING",
        }
    }
}

pub fn partitions_cpu_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SINFO, &["-h", "-o", "%R,%C"])
}

pub fn partitions_gpu_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SINFO,
        &[
            "-h",
            "--Format=Nodes: ,Partition: ,Gres: ,GresUsed:",
            "--state=idle,allocated",
        ],
    )
}

pub fn partitions_jobs_data(
    runner: &dyn CommandRunner,
    state: PartitionJobState,
) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SQUEUE,
        &["-a", "-r", "-h", "-o", "%P", state.squeue_filter()],
    )
}

/// Fold `sinfo -o %R,%C` rows. This is the only query that creates
/// partition records; CPU fields are overwritten by the last row.
pub fn fold_partition_cpus(partitions: &mut BTreeMap<String, PartitionMetrics>, input: &[u8]) {
    let text = String::from_utf8_lossy(input);
    for line in non_empty_lines(&text) {
        let Some(fields) = delimited_fields(line, ',', 2) else {
            continue;
        };
        let cpus = CpuState::parse(fields[1]);
        let partition = partitions.entry(fields[0].trim().to_string()).or_default();
        partition.cpu_allocated = cpus.alloc;
        partition.cpu_idle = cpus.idle;
        partition.cpu_other = cpus.other;
        partition.cpu_total = cpus.total;
    }
}

/// Fold `Nodes Partition Gres GresUsed` rows. Counts are per node, so both
/// totals are scaled by the row's node count and summed across rows.
pub fn fold_partition_gpus(partitions: &mut BTreeMap<String, PartitionMetrics>, input: &[u8]) {
    let text = String::from_utf8_lossy(input);
    for line in non_empty_lines(&text) {
        if !line.contains("gpu:") {
            continue;
        }
        let Some(fields) = whitespace_fields(line, 4) else {
            continue;
        };
        // The default partition carries a `*` suffix in this format.
        let name = fields[1].trim_end_matches('*');
        let Some(partition) = partitions.get_mut(name) else {
            continue;
        };

        let nodes = parse_f64_or_zero(fields[0]);
        let declared = parse_gres_gpu_count(fields[2]);
        let used = parse_gres_gpu_count(fields[3]);

        partition.gpu_idle += nodes * (declared - used);
        partition.gpu_allocated += nodes * used;
    }
}

/// Fold a `squeue -o %P` listing: one job per line.
pub fn fold_partition_jobs(
    partitions: &mut BTreeMap<String, PartitionMetrics>,
    input: &[u8],
    state: PartitionJobState,
) {
    let text = String::from_utf8_lossy(input);
    for line in non_empty_lines(&text) {
        let Some(partition) = partitions.get_mut(line.trim()) else {
            continue;
        };
        match state {
            PartitionJobState::Pending => partition.jobs_pending += 1.0,
            PartitionJobState::Running => partition.jobs_running += 1.0,
        }
    }
}

/// Run all four partition queries and merge them.
///
/// Partitions that only show up in the GPU or job listings are dropped: only
/// the `%R,%C` query creates records. Any failing query fails the pass.
pub fn partitions_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, PartitionMetrics>> {
    let mut partitions = BTreeMap::new();

    fold_partition_cpus(&mut partitions, &partitions_cpu_data(runner)?);
    fold_partition_gpus(&mut partitions, &partitions_gpu_data(runner)?);
    for state in [PartitionJobState::Pending, PartitionJobState::Running] {
        fold_partition_jobs(
            &mut partitions,
            &partitions_jobs_data(runner, state)?,
            state,
        );
    }

    tracing::debug!("Parsed metrics for {} partitions", partitions.len());
    Ok(partitions)
}
