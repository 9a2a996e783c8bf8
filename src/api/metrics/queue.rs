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

use super::{MetricBuilder, MetricExporter};
use crate::collector::queue::QueueMetrics;

type Field = fn(&QueueMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 12] = [
    ("slurm_queue_pending", "Pending jobs in queue", |q| q.pending),
    (
        "slurm_queue_pending_dependency",
        "Pending jobs because of dependency in queue",
        |q| q.pending_dependency,
    ),
    ("slurm_queue_running", "Running jobs in the cluster", |q| q.running),
    ("slurm_queue_suspended", "Suspended jobs in the cluster", |q| q.suspended),
    ("slurm_queue_cancelled", "Cancelled jobs in the cluster", |q| q.cancelled),
    ("slurm_queue_completing", "Completing jobs in the cluster", |q| q.completing),
    ("slurm_queue_completed", "Completed jobs in the cluster", |q| q.completed),
    ("slurm_queue_configuring", "Configuring jobs in the cluster", |q| q.configuring),
    ("slurm_queue_failed", "Number of failed jobs", |q| q.failed),
    ("slurm_queue_timeout", "Jobs stopped by timeout", |q| q.timeout),
    ("slurm_queue_preempted", "Number of preempted jobs", |q| q.preempted),
    ("slurm_queue_node_fail", "Number of jobs stopped due to node fail", |q| q.node_fail),
];

pub struct QueueMetricExporter<'a> {
    queue: &'a QueueMetrics,
}

impl<'a> QueueMetricExporter<'a> {
    pub fn new(queue: &'a QueueMetrics) -> Self {
        Self { queue }
    }
}

impl MetricExporter for QueueMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        for (name, help, field) in FAMILIES {
            builder.single(name, help, field(self.queue));
        }
        builder.build()
    }
}
