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

//! Per-node memory, CPU and partition membership from `sinfo -N`.

use std::collections::{BTreeMap, BTreeSet};

use crate::collector::common::parsers::CpuState;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{parse_f64_or_zero, sorted_unique_lines, whitespace_fields};

const NODE_FORMAT: &str = "NodeList,AllocMem,Memory,CPUsState,StateLong,Partition";

/// State of a single node, merged across all partitions it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMetrics {
    pub mem_alloc: f64,
    pub mem_total: f64,
    pub cpu_alloc: f64,
    pub cpu_idle: f64,
    pub cpu_other: f64,
    pub cpu_total: f64,
    /// Long state label, e.g. `mixed`, `allocated`, `down*`.
    pub status: String,
    pub partitions: BTreeSet<String>,
}

/// Parse `sinfo -h -N -O NodeList,AllocMem,Memory,CPUsState,StateLong,Partition`.
///
/// Raw rows are sorted and deduplicated before folding. Single-valued
/// fields take the value from the last row for a node; partitions
/// accumulate.
pub fn parse_node_metrics(input: &[u8]) -> BTreeMap<String, NodeMetrics> {
    let text = String::from_utf8_lossy(input);
    let mut nodes: BTreeMap<String, NodeMetrics> = BTreeMap::new();

    for line in sorted_unique_lines(&text) {
        let Some(fields) = whitespace_fields(line, 6) else {
            continue;
        };

        let node = nodes.entry(fields[0].to_string()).or_default();
        let cpus = CpuState::parse(fields[3]);

        node.mem_alloc = parse_f64_or_zero(fields[1]);
        node.mem_total = parse_f64_or_zero(fields[2]);
        node.cpu_alloc = cpus.alloc;
        node.cpu_idle = cpus.idle;
        node.cpu_other = cpus.other;
        node.cpu_total = cpus.total;
        node.status = fields[4].to_string();
        node.partitions.insert(fields[5].to_string());
    }

    nodes
}

pub fn node_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SINFO, &["-h", "-N", "-O", NODE_FORMAT])
}

pub fn node_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, NodeMetrics>> {
    let nodes = parse_node_metrics(&node_data(runner)?);
    tracing::debug!("Parsed metrics for {} nodes", nodes.len());
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_A: &str = "node01              128000              256000              16/48/0/64          mixed               compute             ";

    #[test]
    fn test_duplicate_rows_collapse() {
        let input = format!("{ROW_A}\n{ROW_A}\n");
        let nodes = parse_node_metrics(input.as_bytes());

        assert_eq!(nodes.len(), 1);
        let node = &nodes["node01"];
        assert_eq!(node.partitions.len(), 1);
        assert!(node.partitions.contains("compute"));
        assert_eq!(node.mem_alloc, 128000.0);
        assert_eq!(node.mem_total, 256000.0);
        assert_eq!(node.cpu_alloc, 16.0);
        assert_eq!(node.cpu_idle, 48.0);
        assert_eq!(node.cpu_other, 0.0);
        assert_eq!(node.cpu_total, 64.0);
        assert_eq!(node.status, "mixed");
    }

    #[test]
    fn test_partition_set_grows() {
        let input = "node01 0 256000 0/64/0/64 idle compute\n\
                     node01 0 256000 0/64/0/64 idle debug\n";
        let nodes = parse_node_metrics(input.as_bytes());

        assert_eq!(nodes.len(), 1);
        let partitions: Vec<&str> = nodes["node01"].partitions.iter().map(String::as_str).collect();
        assert_eq!(partitions, vec!["compute", "debug"]);
    }

    #[test]
    fn test_status_last_row_wins() {
        // After sorting, the `gpu` row follows the `compute` row.
        let input = "node02 0 1000 0/8/0/8 idle gpu\nnode02 0 1000 0/8/0/8 draining compute\n";
        let nodes = parse_node_metrics(input.as_bytes());
        assert_eq!(nodes["node02"].status, "idle");
    }

    #[test]
    fn test_short_rows_and_bad_numbers() {
        let input = "node03 100 200 1/2/3/4 idle\nnode04 N/A 200 x/2/3/4 down* batch\n";
        let nodes = parse_node_metrics(input.as_bytes());
        assert!(!nodes.contains_key("node03"));
        assert_eq!(nodes["node04"].mem_alloc, 0.0);
        assert_eq!(nodes["node04"].cpu_alloc, 0.0);
        assert_eq!(nodes["node04"].cpu_idle, 2.0);
        assert_eq!(nodes["node04"].status, "down*");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_node_metrics(b"").is_empty());
        assert!(parse_node_metrics(b"\n\n").is_empty());
    }
}
