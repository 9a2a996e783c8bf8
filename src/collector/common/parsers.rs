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

// Field decoders shared by the collectors. None of these fail: anything that
// does not decode becomes zero (or "no class") and the caller moves on.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::common::parse_f64_or_zero;

/// `gpu:<name>:<count>(<opts>)`, where name may be `(null)` or absent.
static GRES_GPU_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"gpu:(\(null\)|[^:(]*):?([0-9]+)(\([^)]*\))?").expect("valid gres pattern")
});

/// CPU counts as printed by sinfo's `%C` / `CPUsState`: `alloc/idle/other/total`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuState {
    pub alloc: f64,
    pub idle: f64,
    pub other: f64,
    pub total: f64,
}

impl CpuState {
    /// Decode `A/I/O/T`. Missing or non-numeric parts are 0.
    pub fn parse(field: &str) -> Self {
        let mut parts = field.trim().split('/').map(parse_f64_or_zero);
        let mut next = || parts.next().unwrap_or(0.0);
        Self {
            alloc: next(),
            idle: next(),
            other: next(),
            total: next(),
        }
    }
}

/// Number of GPUs described by a gres string such as `gpu:a100:4(IDX:0-3)`.
///
/// Several GPU entries in one string (`gpu:a100:2,gpu:v100:4`) are summed.
/// Returns 0 when there is no `gpu:` entry or the entry has no count.
pub fn parse_gres_gpu_count(gres: &str) -> f64 {
    GRES_GPU_RE
        .captures_iter(gres)
        .filter_map(|cap| cap.get(2))
        .map(|count| parse_f64_or_zero(count.as_str()))
        .sum()
}

/// Job states the per-owner collectors count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStateClass {
    Pending,
    Running,
    Suspended,
}

impl JobStateClass {
    /// Case-insensitive prefix match, so `PENDING` and `pending_resources`
    /// are both pending. Anything else (completed, failed, ...) is `None`.
    pub fn classify(state: &str) -> Option<Self> {
        let state = state.trim().to_lowercase();
        if state.starts_with("pending") {
            Some(Self::Pending)
        } else if state.starts_with("running") {
            Some(Self::Running)
        } else if state.starts_with("suspended") {
            Some(Self::Suspended)
        } else {
            None
        }
    }
}

/// Node states as reported by sinfo `%T`, collapsed to the buckets the
/// node-state collector exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStateClass {
    Alloc,
    Comp,
    Down,
    Drain,
    Err,
    Fail,
    Idle,
    Inval,
    Maint,
    Mix,
    Planned,
    Resv,
    Other,
}

impl NodeStateClass {
    /// Classify by prefix so that flagged states (`down*`, `idle~`,
    /// `drained`, `draining`) land in their base bucket.
    pub fn classify(state: &str) -> Self {
        let state = state.trim().to_lowercase();
        const PREFIXES: &[(&str, NodeStateClass)] = &[
            ("alloc", NodeStateClass::Alloc),
            ("comp", NodeStateClass::Comp),
            ("down", NodeStateClass::Down),
            ("drain", NodeStateClass::Drain),
            ("fail", NodeStateClass::Fail),
            ("err", NodeStateClass::Err),
            ("idle", NodeStateClass::Idle),
            ("maint", NodeStateClass::Maint),
            ("mix", NodeStateClass::Mix),
            ("resv", NodeStateClass::Resv),
            ("reserved", NodeStateClass::Resv),
            ("planned", NodeStateClass::Planned),
            ("inval", NodeStateClass::Inval),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| state.starts_with(prefix))
            .map(|(_, class)| *class)
            .unwrap_or(NodeStateClass::Other)
    }
}
