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

// Line tokenizing and lenient number parsing for Slurm command output.

use std::str::FromStr;

/// Parse a number from a string after sanitizing by removing commas, underscores, and trimming.
/// Returns None if parsing fails.
pub fn parse_number<T: FromStr>(s: &str) -> Option<T> {
    let cleaned = s.trim().replace([',', '_'], "");
    cleaned.parse::<T>().ok()
}

/// Parse a count the way Slurm tools are read everywhere in this crate:
/// unparsable text counts as zero.
pub fn parse_f64_or_zero(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(0.0)
}

/// Extract the substring that appears after the first ':' character, trimmed.
/// Returns None if ':' is not present.
pub fn after_colon_trimmed(line: &str) -> Option<&str> {
    line.split_once(':').map(|x| x.1).map(|s| s.trim())
}

/// Lines with any content. Blank lines, including the one a trailing
/// newline would produce, are dropped.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

/// Sorted lines with exact duplicates removed.
///
/// `sinfo -N` prints one row per (node, partition) pair and per state
/// grouping, so identical rows have to collapse before anything is counted.
pub fn sorted_unique_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = non_empty_lines(text).collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Split `line` on `delim`, rejecting it if the delimiter is absent or
/// fewer than `min_fields` fields result.
pub fn delimited_fields(line: &str, delim: char, min_fields: usize) -> Option<Vec<&str>> {
    if !line.contains(delim) {
        return None;
    }
    let fields: Vec<&str> = line.split(delim).collect();
    (fields.len() >= min_fields).then_some(fields)
}

/// Split `line` on whitespace, rejecting it if fewer than `min_fields`
/// fields result.
pub fn whitespace_fields(line: &str, min_fields: usize) -> Option<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    (fields.len() >= min_fields).then_some(fields)
}
