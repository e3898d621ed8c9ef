use clap::ValueEnum;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Runtime settings of the quote engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Upper bound for each catalog lookup. `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl QuoteConfig {
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the `info` default.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
