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

//! Collector passes. Each submodule turns the output of one or more Slurm
//! commands into a metric aggregate; nothing here keeps state between passes.

pub mod accounts;
pub mod common;
pub mod cpus;
pub mod gpus;
pub mod licenses;
pub mod node;
pub mod nodes;
pub mod partitions;
pub mod queue;
pub mod scheduler;

use std::fmt;

use clap::ValueEnum;

/// Names accepted by `--disable-collector`, one per collector pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Collector {
    Accounts,
    Cpus,
    Gpus,
    Licenses,
    Node,
    Nodes,
    Partitions,
    Queue,
    Scheduler,
    Users,
}

impl Collector {
    pub const ALL: [Collector; 10] = [
        Collector::Accounts,
        Collector::Cpus,
        Collector::Gpus,
        Collector::Licenses,
        Collector::Node,
        Collector::Nodes,
        Collector::Partitions,
        Collector::Queue,
        Collector::Scheduler,
        Collector::Users,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collector::Accounts => "accounts",
            Collector::Cpus => "cpus",
            Collector::Gpus => "gpus",
            Collector::Licenses => "licenses",
            Collector::Node => "node",
            Collector::Nodes => "nodes",
            Collector::Partitions => "partitions",
            Collector::Queue => "queue",
            Collector::Scheduler => "scheduler",
            Collector::Users => "users",
        }
    }

    /// GPU accounting issues three extra `sinfo` calls per scrape and is
    /// only useful on clusters with gres configured, so it is opt-in.
    pub fn enabled_by_default(self) -> bool {
        !matches!(self, Collector::Gpus)
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_names_match_value_enum() {
        for collector in Collector::ALL {
            let parsed = Collector::from_str(collector.name(), false).unwrap();
            assert_eq!(parsed, collector);
        }
    }

    #[test]
    fn test_gpus_disabled_by_default() {
        let enabled: Vec<_> = Collector::ALL
            .into_iter()
            .filter(|c| c.enabled_by_default())
            .collect();
        assert_eq!(enabled.len(), 9);
        assert!(!enabled.contains(&Collector::Gpus));
    }
}
