use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use futures_util::future::join_all;

use crate::api::metrics::accounts::JobOwnerMetricExporter;
use crate::api::metrics::cpus::CpuMetricExporter;
use crate::api::metrics::gpus::GpuMetricExporter;
use crate::api::metrics::licenses::LicenseMetricExporter;
use crate::api::metrics::node::NodeMetricExporter;
use crate::api::metrics::nodes::NodeStateMetricExporter;
use crate::api::metrics::partitions::PartitionMetricExporter;
use crate::api::metrics::queue::QueueMetricExporter;
use crate::api::metrics::scheduler::SchedulerMetricExporter;
use crate::api::metrics::MetricExporter;
use crate::collector::common::{CollectorResult, CommandRunner};
use crate::collector::{
    accounts, cpus, gpus, licenses, node, nodes, partitions, queue, scheduler, Collector,
};
use crate::common::config::ExporterConfig;

/// What every scrape needs: how to run commands and which passes to run.
pub struct ExporterState {
    pub runner: Arc<dyn CommandRunner>,
    pub collectors: Vec<Collector>,
    pub telemetry_path: String,
}

pub type SharedState = Arc<ExporterState>;

/// Run one collector pass and render it.
pub fn collect(collector: Collector, runner: &dyn CommandRunner) -> CollectorResult<String> {
    let text = match collector {
        Collector::Accounts => {
            let accounts = accounts::accounts_get_metrics(runner)?;
            JobOwnerMetricExporter::accounts(&accounts).export_metrics()
        }
        Collector::Users => {
            let users = accounts::users_get_metrics(runner)?;
            JobOwnerMetricExporter::users(&users).export_metrics()
        }
        Collector::Cpus => {
            let cpus = cpus::cpus_get_metrics(runner)?;
            CpuMetricExporter::new(&cpus).export_metrics()
        }
        Collector::Gpus => {
            let gpus = gpus::gpus_get_metrics(runner)?;
            GpuMetricExporter::new(&gpus).export_metrics()
        }
        Collector::Licenses => {
            let licenses = licenses::license_get_metrics(runner)?;
            LicenseMetricExporter::new(&licenses).export_metrics()
        }
        Collector::Node => {
            let nodes = node::node_get_metrics(runner)?;
            NodeMetricExporter::new(&nodes).export_metrics()
        }
        Collector::Nodes => {
            let nodes = nodes::nodes_get_metrics(runner)?;
            NodeStateMetricExporter::new(&nodes).export_metrics()
        }
        Collector::Partitions => {
            let partitions = partitions::partitions_get_metrics(runner)?;
            PartitionMetricExporter::new(&partitions).export_metrics()
        }
        Collector::Queue => {
            let queue = queue::queue_get_metrics(runner)?;
            QueueMetricExporter::new(&queue).export_metrics()
        }
        Collector::Scheduler => {
            let scheduler = scheduler::scheduler_get_metrics(runner)?;
            SchedulerMetricExporter::new(&scheduler).export_metrics()
        }
    };
    Ok(text)
}

/// Run every enabled pass on the blocking pool and concatenate the output
/// in collector order. A failed pass is logged and left out.
pub async fn scrape(state: &ExporterState) -> String {
    let tasks = state.collectors.iter().map(|&collector| {
        let runner = Arc::clone(&state.runner);
        tokio::task::spawn_blocking(move || (collector, collect(collector, runner.as_ref())))
    });

    let mut body = String::new();
    for result in join_all(tasks).await {
        match result {
            Ok((_, Ok(text))) => body.push_str(&text),
            Ok((collector, Err(e))) => {
                tracing::error!("Failed to collect {collector} metrics: {e}");
            }
            Err(e) => tracing::error!("Collector task did not complete: {e}"),
        }
    }
    body
}

pub async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let body = scrape(&state).await;
    let content_type = ExporterConfig::PROMETHEUS_CONTENT_TYPE;
    ([(header::CONTENT_TYPE, content_type)], body)
}

pub async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    let path = &state.telemetry_path;
    Html(format!(
        "<html>\n<head><title>Slurm Exporter</title></head>\n<body>\n\
         <h1>Slurm Exporter</h1>\n<p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::common::CollectorError;

    fn state_with(
        collectors: Vec<Collector>,
        runner: impl CommandRunner + 'static,
    ) -> ExporterState {
        ExporterState {
            runner: Arc::new(runner),
            collectors,
            telemetry_path: "/metrics".to_string(),
        }
    }

    #[tokio::test]
    async fn test_scrape_skips_failed_collectors() {
        let state = state_with(
            vec![Collector::Cpus, Collector::Licenses],
            |command: &str, _: &[&str]| -> CollectorResult<Vec<u8>> {
                match command {
                    "sinfo" => Ok(b"5725/877/34/6636\n".to_vec()),
                    _ => Err(CollectorError::Timeout("scontrol".to_string())),
                }
            },
        );

        let body = scrape(&state).await;
        assert!(body.contains("slurm_cpus_alloc 5725\n"));
        assert!(!body.contains("slurm_license"));
    }

    #[tokio::test]
    async fn test_scrape_keeps_collector_order() {
        let state = state_with(
            vec![Collector::Scheduler, Collector::Cpus],
            |command: &str, _: &[&str]| -> CollectorResult<Vec<u8>> {
                match command {
                    "sdiag" => Ok(b"Server thread count: 3\n".to_vec()),
                    _ => Ok(b"1/2/3/6\n".to_vec()),
                }
            },
        );

        let body = scrape(&state).await;
        let sched = body.find("slurm_scheduler_threads 3").unwrap();
        let cpus = body.find("slurm_cpus_total 6").unwrap();
        assert!(sched < cpus);
    }

    #[tokio::test]
    async fn test_index_links_telemetry_path() {
        let state = Arc::new(state_with(
            vec![],
            |_: &str, _: &[&str]| -> CollectorResult<Vec<u8>> { Ok(Vec::new()) },
        ));
        let Html(page) = index_handler(State(state)).await;
        assert!(page.contains("href=\"/metrics\""));
    }
}
