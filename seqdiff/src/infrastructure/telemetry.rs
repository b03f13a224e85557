use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use super::config::TelemetrySettings;

/// Builder for the process-wide log subscriber.
///
/// Output goes to stderr so it never mixes with a command's report on stdout.
#[derive(Debug, Clone)]
pub struct TelemetryBuilder {
    service_name: String,
    log_level: String,
    json: bool,
}

impl TelemetryBuilder {
    /// Creates a builder logging at `warn` in human-readable form.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "warn".to_string(),
            json: false,
        }
    }

    /// Takes level and format from loaded settings.
    #[must_use]
    pub fn with_settings(self, settings: &TelemetrySettings) -> Self {
        self.with_log_level(&settings.log_level).with_json(settings.json)
    }

    /// Sets the filter directive, e.g. `debug` or `seqdiff=trace`.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches between JSON lines and human-readable output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// The filter that [`TelemetryBuilder::init`] installs.
    ///
    /// `RUST_LOG` wins over the configured level when it is set and valid.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(self) -> Result<()> {
        let fmt_layer = if self.json {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .boxed()
        };

        Registry::default()
            .with(self.env_filter())
            .with(fmt_layer)
            .try_init()
            .with_context(|| format!("Failed to init subscriber for {}", self.service_name))?;

        Ok(())
    }
}
