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

//! License inventory from `scontrol show licenses -o`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::parse_f64_or_zero;

static LICENSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"LicenseName=(\S+) Total=(\d+) Used=(\d+) Free=(\d+)")
        .expect("valid license pattern")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseMetrics {
    pub total: f64,
    pub used: f64,
    pub free: f64,
}

/// Parse one license per line. Lines that do not match the
/// `LicenseName=.. Total=.. Used=.. Free=..` shape are ignored; a repeated
/// name replaces the earlier values.
pub fn parse_license_metrics(input: &[u8]) -> BTreeMap<String, LicenseMetrics> {
    let text = String::from_utf8_lossy(input);

    text.lines()
        .filter_map(|line| LICENSE_RE.captures(line))
        .map(|cap| {
            (
                cap[1].to_string(),
                LicenseMetrics {
                    total: parse_f64_or_zero(&cap[2]),
                    used: parse_f64_or_zero(&cap[3]),
                    free: parse_f64_or_zero(&cap[4]),
                },
            )
        })
        .collect()
}

pub fn license_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SCONTROL, &["show", "licenses", "-o"])
}

pub fn license_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, LicenseMetrics>> {
    let licenses = parse_license_metrics(&license_data(runner)?);
    tracing::debug!("Parsed {} licenses", licenses.len());
    Ok(licenses)
}
