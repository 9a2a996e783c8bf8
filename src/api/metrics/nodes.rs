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
use crate::collector::nodes::NodeStateMetrics;

type Field = fn(&NodeStateMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 13] = [
    ("slurm_nodes_alloc", "Allocated nodes", |m| m.alloc),
    ("slurm_nodes_comp", "Completing nodes", |m| m.comp),
    ("slurm_nodes_down", "Down nodes", |m| m.down),
    ("slurm_nodes_drain", "Drain nodes", |m| m.drain),
    ("slurm_nodes_err", "Error nodes", |m| m.err),
    ("slurm_nodes_fail", "Fail nodes", |m| m.fail),
    ("slurm_nodes_idle", "Idle nodes", |m| m.idle),
    ("slurm_nodes_inval", "Inval nodes", |m| m.inval),
    ("slurm_nodes_maint", "Maint nodes", |m| m.maint),
    ("slurm_nodes_mix", "Mix nodes", |m| m.mix),
    ("slurm_nodes_planned", "Planned nodes", |m| m.planned),
    ("slurm_nodes_resv", "Reserved nodes", |m| m.resv),
    ("slurm_nodes_other", "Nodes reported with an unknown state", |m| m.other),
];

/// Node counts by state, grouped by active feature set.
pub struct NodeStateMetricExporter<'a> {
    groups: &'a BTreeMap<String, NodeStateMetrics>,
}

impl<'a> NodeStateMetricExporter<'a> {
    pub fn new(groups: &'a BTreeMap<String, NodeStateMetrics>) -> Self {
        Self { groups }
    }
}

impl MetricExporter for NodeStateMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        if self.groups.is_empty() {
            return builder.build();
        }

        for (name, help, field) in FAMILIES {
            builder.gauge(name, help);
            for (features, metrics) in self.groups {
                let labels = [("active_feature_set", features.as_str())];
                builder.metric(name, &labels, field(metrics));
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_export() {
        let mut groups = BTreeMap::new();
        groups.insert(
            "feature_a,feature_b".to_string(),
            NodeStateMetrics {
                alloc: 40.0,
                idle: 10.0,
                ..Default::default()
            },
        );
        groups.insert("null".to_string(), NodeStateMetrics::default());
        let metrics = NodeStateMetricExporter::new(&groups).export_metrics();

        assert!(metrics
            .contains("slurm_nodes_alloc{active_feature_set=\"feature_a,feature_b\"} 40\n"));
        assert!(metrics.contains("slurm_nodes_alloc{active_feature_set=\"null\"} 0\n"));
        assert_eq!(metrics.matches("# HELP ").count(), FAMILIES.len());
    }
}
