//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config;

/// Keeps the non-blocking writers flushing until dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> TelemetryGuard {
    let mut guards = Vec::new();

    let console_config = &config.console;
    if !console_config.enabled {
        tracing_subscriber::registry().init();
        return TelemetryGuard {
            _log_guards: guards,
        };
    }

    let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(guard);

    let console_filter = get_envfilter(
        console_config.filtering_directive.as_ref(),
        console_config.level.into_level(),
        crates_to_filter.as_ref(),
    );

    match console_config.log_format {
        config::LogFormat::Default => {
            let logging_layer = fmt::layer()
                .with_timer(fmt::time::time())
                .with_span_events(fmt::format::FmtSpan::CLOSE)
                .pretty()
                .with_writer(console_writer)
                .with_filter(console_filter);
            tracing_subscriber::registry().with(logging_layer).init();
        }
        config::LogFormat::Json => {
            let logging_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(console_writer)
                .with_filter(console_filter);
            tracing_subscriber::registry().with(logging_layer).init();
        }
    }

    tracing::debug!(service = service_name, "logger initialised");

    // Returning the WorkerGuard for logs to be printed until it is dropped
    TelemetryGuard {
        _log_guards: guards,
    }
}

/// Targets logged at the configured level; everything else stays at WARN.
const WORKSPACE_TARGETS: [&str; 5] = [
    "common_utils",
    "domain_types",
    "external_services",
    "connector_integration",
    "checkout_server",
];

fn get_envfilter(
    filtering_directive: Option<&String>,
    filter_log_level: tracing::Level,
    crates_to_filter: &[&'static str],
) -> EnvFilter {
    filtering_directive
        .map(|filter| {
            // Safety: If user is overriding the default filtering directive, then we need to panic
            // for invalid directives.
            #[allow(clippy::expect_used)]
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .parse(filter)
                .expect("Invalid EnvFilter filtering directive")
        })
        .unwrap_or_else(|| {
            WORKSPACE_TARGETS
                .iter()
                .chain(crates_to_filter)
                .fold(
                    EnvFilter::builder()
                        .with_default_directive(tracing::Level::WARN.into())
                        .from_env_lossy(),
                    |env_filter, target| {
                        // Safety: This is a hardcoded basic filtering directive. If even the basic
                        // filter is wrong, it's better to panic.
                        #[allow(clippy::expect_used)]
                        env_filter.add_directive(
                            format!("{target}={filter_log_level}")
                                .parse()
                                .expect("Invalid EnvFilter directive format"),
                        )
                    },
                )
        })
}
