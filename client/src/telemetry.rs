//! Telemetry
//!
//! Sets up `tracing-subscriber`: pretty terminal output in debug builds,
//! JSON in release builds.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// Priority: `RUST_LOG` > `log_level` > "info". Only the first call in a
/// process takes effect.
pub fn init_telemetry_with_level(log_level: &str) {
    let default_filter = format!(
        "warn,condition_client={lvl},condition_contracts={lvl},vhc={lvl}",
        lvl = log_level
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}
