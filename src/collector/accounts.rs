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

//! Per-account and per-user job counts from `squeue`.

use std::collections::BTreeMap;

use crate::collector::common::parsers::JobStateClass;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{delimited_fields, non_empty_lines, parse_f64_or_zero};

const ACCOUNTS_FORMAT: &str = "%A|%a|%T|%C";
const USERS_FORMAT: &str = "%A|%u|%T|%C";

/// Job counts for one job owner (account or user).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobMetrics {
    pub pending: f64,
    pub running: f64,
    pub running_cpus: f64,
    pub suspended: f64,
}

impl JobMetrics {
    fn record(&mut self, state: &str, cpus: &str) {
        match JobStateClass::classify(state) {
            Some(JobStateClass::Pending) => self.pending += 1.0,
            Some(JobStateClass::Running) => {
                self.running += 1.0;
                self.running_cpus += parse_f64_or_zero(cpus);
            }
            Some(JobStateClass::Suspended) => self.suspended += 1.0,
            None => {}
        }
    }
}

/// Fold `JobID|Owner|State|CPUs` rows into per-owner counts.
///
/// Rows without `|`, with fewer than four fields, or with an empty owner
/// are skipped.
pub fn parse_job_owner_metrics(input: &[u8]) -> BTreeMap<String, JobMetrics> {
    let text = String::from_utf8_lossy(input);
    let mut owners: BTreeMap<String, JobMetrics> = BTreeMap::new();

    for line in non_empty_lines(&text) {
        let Some(fields) = delimited_fields(line, '|', 4) else {
            continue;
        };
        let owner = fields[1].trim();
        if owner.is_empty() {
            continue;
        }
        owners
            .entry(owner.to_string())
            .or_default()
            .record(fields[2], fields[3]);
    }

    owners
}

/// Parse `squeue -o %A|%a|%T|%C` output keyed by account.
pub fn parse_accounts_metrics(input: &[u8]) -> BTreeMap<String, JobMetrics> {
    parse_job_owner_metrics(input)
}

/// Parse `squeue -o %A|%u|%T|%C` output keyed by user.
pub fn parse_users_metrics(input: &[u8]) -> BTreeMap<String, JobMetrics> {
    parse_job_owner_metrics(input)
}

pub fn accounts_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SQUEUE,
        &["-a", "-r", "-h", "-o", ACCOUNTS_FORMAT],
    )
}

pub fn users_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(
        SlurmCommands::SQUEUE,
        &["-a", "-r", "-h", "-o", USERS_FORMAT],
    )
}

pub fn accounts_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, JobMetrics>> {
    let accounts = parse_accounts_metrics(&accounts_data(runner)?);
    tracing::debug!("Parsed job counts for {} accounts", accounts.len());
    Ok(accounts)
}

pub fn users_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, JobMetrics>> {
    let users = parse_users_metrics(&users_data(runner)?);
    tracing::debug!("Parsed job counts for {} users", users.len());
    Ok(users)
}
