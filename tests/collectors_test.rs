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

//! Collector passes driven end to end over captured Slurm output.

mod common;

use common::{failing_runner, fixture_runner};
use slurm_exporter::collector::common::CollectorError;
use slurm_exporter::collector::{
    accounts, cpus, gpus, licenses, node, nodes, partitions, queue, scheduler,
};

#[test]
fn test_accounts_pass() {
    let accounts = accounts::accounts_get_metrics(&fixture_runner).unwrap();

    assert_eq!(accounts.len(), 3);
    let physics = &accounts["physics"];
    assert_eq!(physics.pending, 1.0);
    assert_eq!(physics.running, 2.0);
    assert_eq!(physics.running_cpus, 48.0);
    assert_eq!(physics.suspended, 0.0);

    let chemistry = &accounts["chemistry"];
    assert_eq!(chemistry.pending, 1.0);
    assert_eq!(chemistry.suspended, 1.0);
    assert_eq!(chemistry.running_cpus, 0.0);

    assert_eq!(accounts["biology"], accounts::JobMetrics::default());
}

#[test]
fn test_users_pass() {
    let users = accounts::users_get_metrics(&fixture_runner).unwrap();

    assert_eq!(users["alice"].running, 2.0);
    assert_eq!(users["alice"].running_cpus, 48.0);
    assert_eq!(users["bob"].pending, 2.0);
    assert_eq!(users["carol"].suspended, 1.0);
}

#[test]
fn test_node_pass() {
    let nodes = node::node_get_metrics(&fixture_runner).unwrap();

    assert_eq!(nodes.len(), 3);
    let a048 = &nodes["a048"];
    assert_eq!(a048.cpu_alloc, 40.0);
    assert_eq!(a048.cpu_total, 50.0);
    assert_eq!(a048.mem_alloc, 327680.0);
    assert_eq!(a048.status, "mixed");
    assert_eq!(
        a048.partitions.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["batch", "gpu"]
    );
    assert_eq!(nodes["c010"].status, "down*");
    assert_eq!(nodes["c010"].cpu_other, 64.0);
}

#[test]
fn test_nodes_pass() {
    let groups = nodes::nodes_get_metrics(&fixture_runner).unwrap();

    let ab = &groups["feature_a,feature_b"];
    assert_eq!(ab.idle, 10.0);
    assert_eq!(ab.down, 10.0);
    assert_eq!(ab.alloc, 40.0);

    let a = &groups["feature_a"];
    assert_eq!(a.alloc, 20.0);
    assert_eq!(a.other, 24.0);
    assert_eq!(a.planned, 3.0);

    assert_eq!(groups["feature_b"].planned, 5.0);
    assert_eq!(groups[nodes::NO_FEATURES].mix, 2.0);
}

#[test]
fn test_partitions_pass() {
    let parts = partitions::partitions_get_metrics(&fixture_runner).unwrap();

    assert_eq!(
        parts.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["batch", "debug", "gpu"]
    );

    let gpu = &parts["gpu"];
    assert_eq!(gpu.cpu_allocated, 40.0);
    assert_eq!(gpu.cpu_total, 64.0);
    assert_eq!(gpu.gpu_idle, 6.0);
    assert_eq!(gpu.gpu_allocated, 6.0);
    assert_eq!(gpu.jobs_pending, 1.0);
    assert_eq!(gpu.jobs_running, 3.0);

    let batch = &parts["batch"];
    assert_eq!(batch.gpu_idle, 0.0);
    assert_eq!(batch.jobs_pending, 2.0);
    assert_eq!(batch.jobs_running, 1.0);

    assert_eq!(parts["debug"].cpu_other, 64.0);
}

#[test]
fn test_partitions_pass_fails_with_squeue() {
    let err = partitions::partitions_get_metrics(&failing_runner("squeue")).unwrap_err();
    assert!(matches!(err, CollectorError::CommandFailed { .. }));
}

#[test]
fn test_licenses_pass() {
    let licenses = licenses::license_get_metrics(&fixture_runner).unwrap();

    assert_eq!(licenses.len(), 2);
    assert_eq!(licenses["ansys@flex"].total, 100.0);
    assert_eq!(licenses["ansys@flex"].used, 20.0);
    assert_eq!(licenses["ansys@flex"].free, 80.0);
    assert_eq!(licenses["matlab"].free, 0.0);
}

#[test]
fn test_cpus_pass() {
    let cpus = cpus::cpus_get_metrics(&fixture_runner).unwrap();

    assert_eq!(cpus.alloc, 5725.0);
    assert_eq!(cpus.idle, 877.0);
    assert_eq!(cpus.other, 34.0);
    assert_eq!(cpus.total, 6636.0);
}

#[test]
fn test_gpus_pass() {
    let gpus = gpus::gpus_get_metrics(&fixture_runner).unwrap();

    assert_eq!(gpus.alloc, 6.0);
    assert_eq!(gpus.total, 14.0);
    assert_eq!(gpus.idle, 8.0);
    assert!((gpus.utilization - 6.0 / 14.0).abs() < 1e-12);
}

#[test]
fn test_queue_pass() {
    let queue = queue::queue_get_metrics(&fixture_runner).unwrap();

    assert_eq!(queue.running, 2.0);
    assert_eq!(queue.pending, 2.0);
    assert_eq!(queue.pending_dependency, 1.0);
    assert_eq!(queue.suspended, 1.0);
    assert_eq!(queue.completed, 1.0);
    assert_eq!(queue.failed, 1.0);
    assert_eq!(queue.timeout, 1.0);
    assert_eq!(queue.cancelled, 0.0);
}

#[test]
fn test_scheduler_pass() {
    let sched = scheduler::scheduler_get_metrics(&fixture_runner).unwrap();

    assert_eq!(sched.threads, 3.0);
    assert_eq!(sched.last_cycle, 97209.0);
    assert_eq!(sched.backfill_last_cycle, 1942890.0);
    assert_eq!(sched.backfill_depth_mean, 29324.0);
    assert_eq!(sched.total_backfilled_jobs_since_cycle, 793.0);
}

#[test]
fn test_scheduler_pass_fails_without_sdiag() {
    assert!(scheduler::scheduler_get_metrics(&failing_runner("sdiag")).is_err());
}
