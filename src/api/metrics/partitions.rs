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
use crate::collector::partitions::PartitionMetrics;

type Field = fn(&PartitionMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 8] = [
    ("slurm_partition_cpus_allocated", "Allocated CPUs for partition", |m| m.cpu_allocated),
    ("slurm_partition_cpus_idle", "Idle CPUs for partition", |m| m.cpu_idle),
    ("slurm_partition_cpus_other", "Other CPUs for partition", |m| m.cpu_other),
    ("slurm_partition_cpus_total", "Total CPUs for partition", |m| m.cpu_total),
    ("slurm_partition_jobs_pending", "Pending jobs for partition", |m| m.jobs_pending),
    ("slurm_partition_jobs_running", "Running jobs for partition", |m| m.jobs_running),
    ("slurm_partition_gpus_idle", "Idle GPUs for partition", |m| m.gpu_idle),
    ("slurm_partition_gpus_allocated", "Allocated GPUs for partition", |m| m.gpu_allocated),
];

pub struct PartitionMetricExporter<'a> {
    partitions: &'a BTreeMap<String, PartitionMetrics>,
}

impl<'a> PartitionMetricExporter<'a> {
    pub fn new(partitions: &'a BTreeMap<String, PartitionMetrics>) -> Self {
        Self { partitions }
    }
}

impl MetricExporter for PartitionMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        if self.partitions.is_empty() {
            return builder.build();
        }

        for (name, help, field) in FAMILIES {
            builder.gauge(name, help);
            for (partition, metrics) in self.partitions {
                builder.metric(name, &[("partition", partition.as_str())], field(metrics));
            }
        }

        builder.build()
    }
}
