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

use std::time::Duration;

use clap::Parser;

use crate::collector::Collector;
use crate::common::config::ExporterConfig;

/// Prometheus exporter for Slurm.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on for telemetry.
    #[arg(long, default_value = ExporterConfig::DEFAULT_LISTEN_ADDRESS)]
    pub listen_address: String,
    /// Path under which to expose metrics. Must start with `/`.
    #[arg(
        long,
        default_value = ExporterConfig::DEFAULT_TELEMETRY_PATH,
        value_parser = parse_telemetry_path
    )]
    pub telemetry_path: String,
    /// Timeout in seconds for each Slurm command.
    #[arg(long, default_value_t = ExporterConfig::DEFAULT_COMMAND_TIMEOUT_SECS)]
    pub command_timeout: u64,
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = ExporterConfig::DEFAULT_LOG_LEVEL)]
    pub log_level: String,
    /// Skip a collector. May be given more than once.
    #[arg(long = "disable-collector", value_enum)]
    pub disable_collectors: Vec<Collector>,
    /// Enable the cluster-wide GPU collector.
    #[arg(long)]
    pub gpus_acct: bool,
}

/// Accept only literal route paths: a leading `/` and no capture or
/// wildcard syntax, which the router would panic on or treat as a pattern.
fn parse_telemetry_path(path: &str) -> Result<String, String> {
    if !path.starts_with('/') {
        return Err(format!("telemetry path must start with '/': {path:?}"));
    }
    if path.contains(['{', '}']) || path.split('/').any(|s| s.starts_with([':', '*'])) {
        return Err(format!(
            "telemetry path must be a literal path without captures or wildcards: {path:?}"
        ));
    }
    Ok(path.to_string())
}

impl Cli {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout)
    }

    /// Collectors to run on every scrape, in a fixed order.
    pub fn enabled_collectors(&self) -> Vec<Collector> {
        Collector::ALL
            .into_iter()
            .filter(|c| c.enabled_by_default() || (*c == Collector::Gpus && self.gpus_acct))
            .filter(|c| !self.disable_collectors.contains(c))
            .collect()
    }
}
