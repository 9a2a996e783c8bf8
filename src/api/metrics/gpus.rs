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
use crate::collector::gpus::GpuMetrics;

pub struct GpuMetricExporter<'a> {
    gpus: &'a GpuMetrics,
}

impl<'a> GpuMetricExporter<'a> {
    pub fn new(gpus: &'a GpuMetrics) -> Self {
        Self { gpus }
    }
}

impl MetricExporter for GpuMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        builder
            .single("slurm_gpus_alloc", "Allocated GPUs", self.gpus.alloc)
            .single("slurm_gpus_idle", "Idle GPUs", self.gpus.idle)
            .single("slurm_gpus_total", "Total GPUs", self.gpus.total)
            .single(
                "slurm_gpus_utilization",
                "Total GPU utilization",
                self.gpus.utilization,
            );
        builder.build()
    }
}
