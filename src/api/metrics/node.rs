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

use std::collections::BTreeMap;

use super::{MetricBuilder, MetricExporter};
use crate::collector::node::NodeMetrics;

type Field = fn(&NodeMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 7] = [
    ("slurm_node_cpu_alloc", "Allocated CPUs per node", |m| m.cpu_alloc),
    ("slurm_node_cpu_idle", "Idle CPUs per node", |m| m.cpu_idle),
    ("slurm_node_cpu_other", "Other CPUs per node", |m| m.cpu_other),
    ("slurm_node_cpu_total", "Total CPUs per node", |m| m.cpu_total),
    ("slurm_node_mem_alloc", "Allocated memory per node", |m| m.mem_alloc),
    ("slurm_node_mem_total", "Total memory per node", |m| m.mem_total),
    ("slurm_node_status", "Node Status with partition", |_| 1.0),
];

/// Per-node gauges, one series per (node, partition) pair.
pub struct NodeMetricExporter<'a> {
    nodes: &'a BTreeMap<String, NodeMetrics>,
}

impl<'a> NodeMetricExporter<'a> {
    pub fn new(nodes: &'a BTreeMap<String, NodeMetrics>) -> Self {
        Self { nodes }
    }
}

impl MetricExporter for NodeMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        if self.nodes.is_empty() {
            return builder.build();
        }

        for (name, help, field) in FAMILIES {
            builder.gauge(name, help);
            for (node, metrics) in self.nodes {
                let value = field(metrics);
                for partition in &metrics.partitions {
                    let labels = [
                        ("node", node.as_str()),
                        ("status", metrics.status.as_str()),
                        ("partition", partition.as_str()),
                    ];
                    builder.metric(name, &labels, value);
                }
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_node_series_per_partition() {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "a048".to_string(),
            NodeMetrics {
                mem_alloc: 327_680.0,
                mem_total: 386_000.0,
                cpu_alloc: 40.0,
                cpu_idle: 10.0,
                cpu_other: 0.0,
                cpu_total: 50.0,
                status: "mixed".to_string(),
                partitions: BTreeSet::from(["gpu".to_string(), "batch".to_string()]),
            },
        );
        let metrics = NodeMetricExporter::new(&nodes).export_metrics();

        assert!(metrics.contains(
            "slurm_node_cpu_alloc{node=\"a048\",status=\"mixed\",partition=\"batch\"} 40\n"
        ));
        assert!(metrics.contains(
            "slurm_node_cpu_alloc{node=\"a048\",status=\"mixed\",partition=\"gpu\"} 40\n"
        ));
        assert!(metrics.contains(
            "slurm_node_status{node=\"a048\",status=\"mixed\",partition=\"gpu\"} 1\n"
        ));
        let mem_total_type = "# TYPE slurm_node_mem_total gauge";
        assert_eq!(metrics.matches(mem_total_type).count(), 1);
    }

    #[test]
    fn test_no_nodes() {
        let nodes = BTreeMap::new();
        assert!(NodeMetricExporter::new(&nodes).export_metrics().is_empty());
    }
}
