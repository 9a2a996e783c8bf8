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
use crate::collector::accounts::JobMetrics;

/// Which job owner the aggregate is keyed by. Picks the metric prefix and
/// the label name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOwner {
    Account,
    User,
}

impl JobOwner {
    fn label(self) -> &'static str {
        match self {
            JobOwner::Account => "account",
            JobOwner::User => "user",
        }
    }
}

type Field = fn(&JobMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 4] = [
    ("jobs_pending", "Pending jobs for", |m| m.pending),
    ("jobs_running", "Running jobs for", |m| m.running),
    ("cpus_running", "Running cpus for", |m| m.running_cpus),
    ("jobs_suspended", "Suspended jobs for", |m| m.suspended),
];

/// Per-account or per-user job gauges. Zero samples are left out, so an
/// owner with only pending jobs exports a single series.
pub struct JobOwnerMetricExporter<'a> {
    owners: &'a BTreeMap<String, JobMetrics>,
    owner: JobOwner,
}

impl<'a> JobOwnerMetricExporter<'a> {
    pub fn accounts(owners: &'a BTreeMap<String, JobMetrics>) -> Self {
        Self {
            owners,
            owner: JobOwner::Account,
        }
    }

    pub fn users(owners: &'a BTreeMap<String, JobMetrics>) -> Self {
        Self {
            owners,
            owner: JobOwner::User,
        }
    }
}

impl MetricExporter for JobOwnerMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        let label = self.owner.label();

        for (suffix, help, field) in FAMILIES {
            let samples: Vec<_> = self
                .owners
                .iter()
                .map(|(owner, metrics)| (owner, field(metrics)))
                .filter(|(_, value)| *value > 0.0)
                .collect();
            if samples.is_empty() {
                continue;
            }

            let name = format!("slurm_{label}_{suffix}");
            builder.gauge(&name, &format!("{help} {label}"));
            for (owner, value) in samples {
                builder.metric(&name, &[(label, owner.as_str())], value);
            }
        }

        builder.build()
    }
}
