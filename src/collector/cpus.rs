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

//! Cluster-wide CPU allocation from `sinfo -o %C`.

use crate::collector::common::parsers::CpuState;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::non_empty_lines;

pub type CpuMetrics = CpuState;

/// Decode the first `A/I/O/T` line. No such line yields all zeros.
pub fn parse_cpus_metrics(input: &[u8]) -> CpuMetrics {
    let text = String::from_utf8_lossy(input);
    let mut lines = non_empty_lines(&text);
    lines
        .find(|line| line.contains('/'))
        .map(CpuState::parse)
        .unwrap_or_default()
}

pub fn cpus_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SINFO, &["-h", "-o", "%C"])
}

pub fn cpus_get_metrics(runner: &dyn CommandRunner) -> CollectorResult<CpuMetrics> {
    Ok(parse_cpus_metrics(&cpus_data(runner)?))
}
