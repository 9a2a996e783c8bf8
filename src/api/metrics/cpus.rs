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
use crate::collector::cpus::CpuMetrics;

pub struct CpuMetricExporter<'a> {
    cpus: &'a CpuMetrics,
}

impl<'a> CpuMetricExporter<'a> {
    pub fn new(cpus: &'a CpuMetrics) -> Self {
        Self { cpus }
    }
}

impl MetricExporter for CpuMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        builder
            .single("slurm_cpus_alloc", "Allocated CPUs", self.cpus.alloc)
            .single("slurm_cpus_idle", "Idle CPUs", self.cpus.idle)
            .single("slurm_cpus_other", "Mix CPUs", self.cpus.other)
            .single("slurm_cpus_total", "Total CPUs", self.cpus.total);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_export() {
        let cpus = CpuMetrics {
            alloc: 5725.0,
            idle: 877.0,
            other: 34.0,
            total: 6636.0,
        };
        let metrics = CpuMetricExporter::new(&cpus).export_metrics();

        assert!(metrics.contains("slurm_cpus_alloc 5725\n"));
        assert!(metrics.contains("slurm_cpus_idle 877\n"));
        assert!(metrics.contains("slurm_cpus_other 34\n"));
        assert!(metrics.contains("slurm_cpus_total 6636\n"));
    }
}
