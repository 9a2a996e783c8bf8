//! Parsing macros for repeated text parsing patterns.

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

/// Parse a numeric metric value from a "Key: Value [rest]" line, as printed
/// by `sdiag`.
/// - Extracts substring after the first ':'.
/// - Takes the first whitespace-separated token.
/// - Parses it into the requested numeric type.
///
/// Returns Option<T> (None if parsing fails).
#[macro_export]
macro_rules! parse_metric {
    ($line:expr, $ty:ty) => {{
        let opt = $crate::parsing::common::after_colon_trimmed($line)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|num| $crate::parsing::common::parse_number::<$ty>(num));
        opt
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_parse_metric_count() {
        let line = "Server thread count: 3";
        let v = parse_metric!(line, u32);
        assert_eq!(v, Some(3u32));
    }

    #[test]
    fn test_parse_metric_trailing_text() {
        let line = "\tTotal backfilled jobs (since last slurm start): 111544";
        let v = parse_metric!(line, f64);
        assert_eq!(v, Some(111544.0));
    }

    #[test]
    fn test_parse_metric_invalid() {
        let line = "Invalid Line";
        let v = parse_metric!(line, u32);
        assert!(v.is_none());
        let line = "Last cycle when: Mon Jan 01 10:00:00 2024";
        assert!(parse_metric!(line, f64).is_none());
    }
}
