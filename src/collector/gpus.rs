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

//! Cluster-wide GPU allocation, reconciled from three `sinfo` gres listings.

use crate::collector::common::parsers::parse_gres_gpu_count;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{non_empty_lines, parse_f64_or_zero, whitespace_fields};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuMetrics {
    pub alloc: f64,
    pub idle: f64,
    pub total: f64,
    pub utilization: f64,
}

pub fn allocated_gpus_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SINFO,
        &[
            "-a",
            "-h",
            "--Format=Nodes: ,GresUsed:",
            "--state=allocated",
        ],
    )
}

pub fn total_gpus_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SINFO,
        &["-a", "-h", "--Format=Nodes: ,Gres: "],
    )
}

pub fn idle_gpus_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SINFO,
        &[
            "-a",
            "-h",
            "--Format=Nodes: ,Gres: ,GresUsed:",
            "--state=idle,allocated",
        ],
    )
}

/// Rows carrying a gres token, split into fields. `min_fields` counts the
/// node-count column.
fn gres_rows(text: &str, min_fields: usize) -> impl Iterator<Item = Vec<&str>> {
    non_empty_lines(text)
        .filter(|line| line.contains("gpu:"))
        .filter_map(move |line| whitespace_fields(line.trim_matches('"'), min_fields))
}

/// Sum of `nodes × gpus` over `Nodes GresUsed` rows.
pub fn parse_allocated_gpus(input: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(input);
    gres_rows(&text, 2)
        .map(|f| parse_f64_or_zero(f[0]) * parse_gres_gpu_count(f[1]))
        .sum()
}

/// Sum of `nodes × gpus` over `Nodes Gres` rows.
pub fn parse_total_gpus(input: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(input);
    gres_rows(&text, 2)
        .map(|f| parse_f64_or_zero(f[0]) * parse_gres_gpu_count(f[1]))
        .sum()
}

/// Sum of `nodes × (declared − used)` over `Nodes Gres GresUsed` rows.
pub fn parse_idle_gpus(input: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(input);
    gres_rows(&text, 3)
        .map(|f| {
            parse_f64_or_zero(f[0]) * (parse_gres_gpu_count(f[1]) - parse_gres_gpu_count(f[2]))
        })
        .sum()
}

pub fn gpus_get_metrics(runner: &dyn CommandRunner) -> CollectorResult<GpuMetrics> {
    let alloc = parse_allocated_gpus(&allocated_gpus_data(runner)?);
    let idle = parse_idle_gpus(&idle_gpus_data(runner)?);
    let total = parse_total_gpus(&total_gpus_data(runner)?);
    let utilization = if total > 0.0 { alloc / total } else { 0.0 };

    Ok(GpuMetrics {
        alloc,
        idle,
        total,
        utilization,
    })
}
