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

//! Scheduler statistics from `sdiag`.
//!
//! `sdiag` prints `Key: value` lines in two sections. The main scheduler
//! section and the `Backfilling stats` section both have `Last cycle` and
//! `Mean cycle`, so the parser tracks which section it is in.

use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerMetrics {
    pub threads: f64,
    pub queue_size: f64,
    pub dbd_queue_size: f64,
    pub last_cycle: f64,
    pub mean_cycle: f64,
    pub cycle_per_minute: f64,
    pub backfill_last_cycle: f64,
    pub backfill_mean_cycle: f64,
    pub backfill_depth_mean: f64,
    pub total_backfilled_jobs_since_start: f64,
    pub total_backfilled_jobs_since_cycle: f64,
    pub total_backfilled_heterogeneous: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Main,
    Backfill,
}

pub fn parse_scheduler_metrics(input: &[u8]) -> SchedulerMetrics {
    let text = String::from_utf8_lossy(input);
    let mut sched = SchedulerMetrics::default();
    let mut section = Section::Main;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Backfilling stats") {
            section = Section::Backfill;
            continue;
        }
        // Anything after the backfill block (RPC statistics) is ignored.
        if trimmed.starts_with("Latency for") || trimmed.starts_with("Remote Procedure Call") {
            break;
        }
        let Some((key, _)) = trimmed.split_once(':') else {
            continue;
        };
        let Some(value) = parse_metric!(trimmed, f64) else {
            continue;
        };

        let field = match (section, key.trim()) {
            (_, "Server thread count") => &mut sched.threads,
            (_, "Agent queue size") => &mut sched.queue_size,
            (_, "DBD Agent queue size") => &mut sched.dbd_queue_size,
            (Section::Main, "Last cycle") => &mut sched.last_cycle,
            (Section::Main, "Mean cycle") => &mut sched.mean_cycle,
            (Section::Main, "Cycles per minute") => &mut sched.cycle_per_minute,
            (Section::Backfill, "Last cycle") => &mut sched.backfill_last_cycle,
            (Section::Backfill, "Mean cycle") => &mut sched.backfill_mean_cycle,
            (Section::Backfill, "Depth Mean") => &mut sched.backfill_depth_mean,
            (
                Section::Backfill,
                "Total backfilled jobs (since last slurm start)",
            ) => {
                &mut sched.total_backfilled_jobs_since_start
            }
            (
                Section::Backfill,
                "Total backfilled jobs (since last stats cycle start)",
            ) => {
                &mut sched.total_backfilled_jobs_since_cycle
            }
            (
                Section::Backfill,
                "Total backfilled heterogeneous job components",
            ) => {
                &mut sched.total_backfilled_heterogeneous
            }
            _ => continue,
        };
        *field = value;
    }

    sched
}

pub fn scheduler_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SDIAG, &[])
}

pub fn scheduler_get_metrics(runner: &dyn CommandRunner) -> CollectorResult<SchedulerMetrics> {
    Ok(parse_scheduler_metrics(&scheduler_data(runner)?))
}
