//! Tracing subscriber initialisation.
//!
//! Library crates only emit `tracing` events; binaries pick a subscriber here.
//!
//! ```rust,ignore
//! use palaver_extras::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let _guard = init_subscriber(
//!     SubscriberConfig::builder()
//!         .log_level(tracing::Level::DEBUG)
//!         .output_format(OutputFormat::Json)
//!         .build(),
//! )?;
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::{ExtrasError, Result};

pub const LOG_LEVEL_ENV: &str = "PALAVER_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "PALAVER_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "PALAVER_LOG_FILE";

const ALREADY_SET: &str = "global default trace dispatcher has already been set";

const CRATES: [&str; 6] = [
    "palaver",
    "palaver_spec",
    "palaver_core",
    "palaver_registry",
    "palaver_providers",
    "palaver_extras",
];

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// One JSON object per line with event fields flattened to the top level.
    JsonCompact,
}

impl OutputFormat {
    /// Parse `text`, `json` or `json-compact`, ignoring case.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            other => Err(ExtrasError::TelemetryInit(format!(
                "Invalid log format: {other}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    pub enable_console: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Defaults at `DEBUG` level.
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// JSON to a file, warnings and above, no console.
    pub fn production(log_file: PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Json,
            enable_console: false,
            log_file: Some(log_file),
        }
    }

    /// Build from `PALAVER_LOG_*` values supplied by `lookup`.
    ///
    /// Unset variables keep their defaults; unparseable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            builder = builder.log_level_str(&level)?;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            builder = builder.output_format(OutputFormat::parse(&format)?);
        }
        if let Some(path) = lookup(LOG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            builder = builder.log_file(PathBuf::from(path));
        }
        Ok(builder.build())
    }

    /// `EnvFilter` directive enabling the palaver crates at the configured level.
    pub fn filter_directive(&self) -> String {
        let level = level_str(self.log_level);
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    /// Set the log level.
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Parse and set the log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.trim().to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(ExtrasError::TelemetryInit(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        self.log_level = Some(level);
        Ok(self)
    }

    /// Set the output format.
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Enable or disable stderr output.
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    /// Also write to this file.
    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Build the configuration; unset fields take their defaults.
    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

fn level_str(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::TRACE => "trace",
        tracing::Level::DEBUG => "debug",
        tracing::Level::INFO => "info",
        tracing::Level::WARN => "warn",
        tracing::Level::ERROR => "error",
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(format: OutputFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true);
    match format {
        OutputFormat::Text => base.with_ansi(ansi).boxed(),
        OutputFormat::Json => base
            .json()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        OutputFormat::JsonCompact => base.json().flatten_event(true).boxed(),
    }
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path.file_name().ok_or_else(|| {
        ExtrasError::TelemetryInit(format!("Log file path has no file name: {}", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when `log_file` is set; keep it alive for
/// the life of the program or buffered lines are lost. If a global subscriber
/// is already installed it is left in place and `Ok(None)` is returned. Any
/// other installation failure is a `TelemetryInit` error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| ExtrasError::TelemetryInit(format!("Invalid filter: {e}")))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_console {
        layers.push(fmt_layer(config.output_format, std::io::stderr, true));
    }
    let guard = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            layers.push(fmt_layer(config.output_format, writer, false));
            Some(guard)
        }
        None => None,
    };

    if tracing::dispatcher::has_been_set() {
        tracing::debug!("tracing subscriber already installed");
        return Ok(None);
    }

    match tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        Ok(()) => Ok(guard),
        Err(e) if e.to_string().contains(ALREADY_SET) => {
            tracing::debug!("tracing subscriber already installed");
            Ok(None)
        }
        Err(e) => Err(ExtrasError::TelemetryInit(format!(
            "Failed to install tracing subscriber: {e}"
        ))),
    }
}

/// Install the default subscriber: text to stderr at `INFO`.
pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

/// Install a `DEBUG` level subscriber.
pub fn init_debug() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::debug())
}

/// Install a JSON file subscriber at `WARN`.
pub fn init_production(log_file: PathBuf) -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::production(log_file))
}

/// Initialise from `PALAVER_LOG_LEVEL` (trace..error), `PALAVER_LOG_FORMAT`
/// (text, json, json-compact) and `PALAVER_LOG_FILE`.
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::from_lookup(|var| std::env::var(var).ok())?)
}
