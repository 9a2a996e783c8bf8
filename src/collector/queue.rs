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

//! Cluster-wide job counts by state from `squeue`.

use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{delimited_fields, non_empty_lines};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueMetrics {
    pub pending: f64,
    pub pending_dependency: f64,
    pub running: f64,
    pub suspended: f64,
    pub cancelled: f64,
    pub completing: f64,
    pub completed: f64,
    pub configuring: f64,
    pub failed: f64,
    pub timeout: f64,
    pub preempted: f64,
    pub node_fail: f64,
}

impl QueueMetrics {
    fn record(&mut self, state: &str, reason: &str) {
        let state = state.trim().to_lowercase();
        let counter = match state.as_str() {
            s if s.starts_with("pending") => {
                if reason.trim() == "Dependency" {
                    &mut self.pending_dependency
                } else {
                    &mut self.pending
                }
            }
            s if s.starts_with("running") => &mut self.running,
            s if s.starts_with("suspended") => &mut self.suspended,
            s if s.starts_with("cancelled") => &mut self.cancelled,
            s if s.starts_with("completing") => &mut self.completing,
            s if s.starts_with("completed") => &mut self.completed,
            s if s.starts_with("configuring") => &mut self.configuring,
            s if s.starts_with("failed") => &mut self.failed,
            s if s.starts_with("timeout") => &mut self.timeout,
            s if s.starts_with("preempted") => &mut self.preempted,
            s if s.starts_with("node_fail") => &mut self.node_fail,
            _ => return,
        };
        *counter += 1.0;
    }
}

/// Parse `squeue -h -o %A,%T,%r` rows.
pub fn parse_queue_metrics(input: &[u8]) -> QueueMetrics {
    let text = String::from_utf8_lossy(input);
    let mut queue = QueueMetrics::default();

    for line in non_empty_lines(&text) {
        if let Some(fields) = delimited_fields(line, ',', 3) {
            queue.record(fields[1], fields[2]);
        }
    }

    queue
}

pub fn queue_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SQUEUE,
        &["-a", "-r", "-h", "-o", "%A,%T,%r", "--states=all"],
    )
}

pub fn queue_get_metrics(runner: &dyn CommandRunner) -> CollectorResult<QueueMetrics> {
    Ok(parse_queue_metrics(&queue_data(runner)?))
}
