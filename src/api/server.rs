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

use std::io;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::handlers::{index_handler, metrics_handler, ExporterState, SharedState};
use crate::cli::Cli;
use crate::collector::common::SystemCommandRunner;

/// Install the global subscriber. `RUST_LOG` wins over `--log-level`.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("slurm_exporter={log_level},tower_http={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn router(state: SharedState) -> Router {
    let telemetry_path = state.telemetry_path.clone();
    let mut app = Router::new().route(&telemetry_path, get(metrics_handler));
    if telemetry_path != "/" {
        app = app.route("/", get(index_handler));
    }
    app.with_state(state).layer(TraceLayer::new_for_http())
}

/// Bind the listener and serve until the process is stopped.
pub async fn run_exporter(args: &Cli) -> io::Result<()> {
    let collectors = args.enabled_collectors();
    tracing::info!(
        "Enabled collectors: {}",
        collectors
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let runner = SystemCommandRunner::new(args.command_timeout());
    tracing::info!("Slurm command timeout: {:?}", runner.timeout());

    let state = Arc::new(ExporterState {
        runner: Arc::new(runner),
        collectors,
        telemetry_path: args.telemetry_path.clone(),
    });
    let app = router(state);

    let address = &args.listen_address;
    let listener = TcpListener::bind(address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener on {address}: {e}");
        e
    })?;
    match listener.local_addr() {
        Ok(addr) => tracing::info!("Serving metrics on http://{addr}{}", args.telemetry_path),
        Err(_) => tracing::info!("Serving metrics on {address}"),
    }

    axum::serve(listener, app).await
}
