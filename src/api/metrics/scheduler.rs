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
use crate::collector::scheduler::SchedulerMetrics;

pub struct SchedulerMetricExporter<'a> {
    sched: &'a SchedulerMetrics,
}

impl<'a> SchedulerMetricExporter<'a> {
    pub fn new(sched: &'a SchedulerMetrics) -> Self {
        Self { sched }
    }
}

impl MetricExporter for SchedulerMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let s = self.sched;
        let mut builder = MetricBuilder::new();

        builder
            .single(
                "slurm_scheduler_threads",
                "Information provided by the Slurm sdiag command, number of scheduler threads",
                s.threads,
            )
            .single(
                "slurm_scheduler_queue_size",
                "Information provided by the Slurm sdiag command, length of the scheduler queue",
                s.queue_size,
            )
            .single(
                "slurm_scheduler_dbd_queue_size",
                "Information provided by the Slurm sdiag command, length of the DBD agent queue",
                s.dbd_queue_size,
            )
            .single(
                "slurm_scheduler_last_cycle",
                "Information provided by the Slurm sdiag command, scheduler last cycle time in (microseconds)",
                s.last_cycle,
            )
            .single(
                "slurm_scheduler_mean_cycle",
                "Information provided by the Slurm sdiag command, scheduler mean cycle time in (microseconds)",
                s.mean_cycle,
            )
            .single(
                "slurm_scheduler_cycle_per_minute",
                "Information provided by the Slurm sdiag command, number scheduler cycles per minute",
                s.cycle_per_minute,
            );

        // Backfill section
        builder
            .single(
                "slurm_scheduler_backfill_last_cycle",
                "Information provided by the Slurm sdiag command, scheduler backfill last cycle time in (microseconds)",
                s.backfill_last_cycle,
            )
            .single(
                "slurm_scheduler_backfill_mean_cycle",
                "Information provided by the Slurm sdiag command, scheduler backfill mean cycle time in (microseconds)",
                s.backfill_mean_cycle,
            )
            .single(
                "slurm_scheduler_backfill_depth_mean",
                "Information provided by the Slurm sdiag command, scheduler backfill mean depth",
                s.backfill_depth_mean,
            )
            .single(
                "slurm_scheduler_backfilled_jobs_since_start_total",
                "Information provided by the Slurm sdiag command, number of jobs started thanks to backfilling since last slurm start",
                s.total_backfilled_jobs_since_start,
            )
            .single(
                "slurm_scheduler_backfilled_jobs_since_cycle_total",
                "Information provided by the Slurm sdiag command, number of jobs started thanks to backfilling since last time stats where reset",
                s.total_backfilled_jobs_since_cycle,
            )
            .single(
                "slurm_scheduler_backfilled_heterogeneous_total",
                "Information provided by the Slurm sdiag command, number of heterogeneous job components started thanks to backfilling since last Slurm start",
                s.total_backfilled_heterogeneous,
            );

        builder.build()
    }
}
