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
use crate::collector::licenses::LicenseMetrics;

type Field = fn(&LicenseMetrics) -> f64;

const FAMILIES: [(&str, &str, Field); 3] = [
    ("slurm_license_total", "Total licenses", |m| m.total),
    ("slurm_license_used", "Used licenses", |m| m.used),
    ("slurm_license_free", "Free licenses", |m| m.free),
];

pub struct LicenseMetricExporter<'a> {
    licenses: &'a BTreeMap<String, LicenseMetrics>,
}

impl<'a> LicenseMetricExporter<'a> {
    pub fn new(licenses: &'a BTreeMap<String, LicenseMetrics>) -> Self {
        Self { licenses }
    }
}

impl MetricExporter for LicenseMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        if self.licenses.is_empty() {
            return builder.build();
        }

        for (name, help, field) in FAMILIES {
            builder.gauge(name, help);
            for (license, metrics) in self.licenses {
                builder.metric(name, &[("license", license.as_str())], field(metrics));
            }
        }

        builder.build()
    }
}
