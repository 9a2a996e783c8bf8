/// Exporter-wide defaults. CLI flags override these at startup.
pub struct ExporterConfig;

impl ExporterConfig {
    // HTTP
    pub const DEFAULT_LISTEN_ADDRESS: &'static str = "0.0.0.0:8080";
    pub const DEFAULT_TELEMETRY_PATH: &'static str = "/metrics";
    pub const PROMETHEUS_CONTENT_TYPE: &'static str = "text/plain; version=0.0.4; charset=utf-8";

    // Command execution
    pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 5;

    // Logging
    pub const DEFAULT_LOG_LEVEL: &'static str = "info";
}

/// Slurm binaries invoked by the collectors.
pub struct SlurmCommands;

impl SlurmCommands {
    pub const SQUEUE: &'static str = "squeue";
    pub const SINFO: &'static str = "sinfo";
    pub const SCONTROL: &'static str = "scontrol";
    pub const SDIAG: &'static str = "sdiag";
}
