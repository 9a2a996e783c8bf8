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

//! Node counts per state, grouped by node feature set, from `sinfo -o %D|%T|%b`.

use std::collections::BTreeMap;

use crate::collector::common::parsers::NodeStateClass;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::common::config::SlurmCommands;
use crate::parsing::common::{delimited_fields, parse_f64_or_zero, sorted_unique_lines};

const NODES_FORMAT: &str = "%D|%T|%b";

/// Group key used for nodes without any features.
pub const NO_FEATURES: &str = "null";

/// Node counts per state for one feature set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStateMetrics {
    pub alloc: f64,
    pub comp: f64,
    pub down: f64,
    pub drain: f64,
    pub err: f64,
    pub fail: f64,
    pub idle: f64,
    pub inval: f64,
    pub maint: f64,
    pub mix: f64,
    pub planned: f64,
    pub resv: f64,
    pub other: f64,
}

impl NodeStateMetrics {
    fn bucket_mut(&mut self, class: NodeStateClass) -> &mut f64 {
        match class {
            NodeStateClass::Alloc => &mut self.alloc,
            NodeStateClass::Comp => &mut self.comp,
            NodeStateClass::Down => &mut self.down,
            NodeStateClass::Drain => &mut self.drain,
            NodeStateClass::Err => &mut self.err,
            NodeStateClass::Fail => &mut self.fail,
            NodeStateClass::Idle => &mut self.idle,
            NodeStateClass::Inval => &mut self.inval,
            NodeStateClass::Maint => &mut self.maint,
            NodeStateClass::Mix => &mut self.mix,
            NodeStateClass::Planned => &mut self.planned,
            NodeStateClass::Resv => &mut self.resv,
            NodeStateClass::Other => &mut self.other,
        }
    }
}

/// Normalize a `%b` feature list into a group key: features sorted and
/// comma-joined, or [`NO_FEATURES`] when there are none.
pub fn feature_set_key(features: &str) -> String {
    let features = features.trim();
    if features.is_empty() || features == "(null)" {
        return NO_FEATURES.to_string();
    }
    let mut list: Vec<&str> = features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if list.is_empty() {
        return NO_FEATURES.to_string();
    }
    list.sort_unstable();
    list.dedup();
    list.join(",")
}

/// Parse `sinfo -h -o %D|%T|%b`. Each row adds its node count (`%D`) to
/// the bucket for its state under its feature set.
pub fn parse_nodes_metrics(input: &[u8]) -> BTreeMap<String, NodeStateMetrics> {
    let text = String::from_utf8_lossy(input);
    let mut groups: BTreeMap<String, NodeStateMetrics> = BTreeMap::new();

    for line in sorted_unique_lines(&text) {
        let Some(fields) = delimited_fields(line, '|', 3) else {
            continue;
        };
        let count = parse_f64_or_zero(fields[0]);
        let class = NodeStateClass::classify(fields[1]);

        *groups
            .entry(feature_set_key(fields[2]))
            .or_default()
            .bucket_mut(class) += count;
    }

    groups
}

pub fn nodes_data(runner: &dyn CommandRunner) -> CollectorResult<Vec<u8>> {
    runner.run(SlurmCommands::SINFO, &["-h", "-o", NODES_FORMAT])
}

pub fn nodes_get_metrics(
    runner: &dyn CommandRunner,
) -> CollectorResult<BTreeMap<String, NodeStateMetrics>> {
    let groups = parse_nodes_metrics(&nodes_data(runner)?);
    tracing::debug!("Parsed node states for {} feature sets", groups.len());
    Ok(groups)
}
