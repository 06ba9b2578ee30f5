//! Logging setup
//!
//! All log output goes to stderr so stdout only carries command output.
//!
//! Environment variables:
//!
//! * `CBOX_LOG_FORMAT` - `json` for structured output, anything else for text
//! * `CBOX_LOG` - filter directives, e.g. `cbox_core=trace`
//! * `RUST_LOG` - used when `CBOX_LOG` is unset

use std::io;
use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "warn";

/// Initialize logging. The format flag wins over `CBOX_LOG_FORMAT`; later calls
/// are no-ops.
pub fn init(format: Option<&str>) {
    INIT.call_once(|| {
        let env_format = std::env::var("CBOX_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");
        let filter = create_env_filter();

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!(format = effective_format, "logging initialized");
    });
}

fn create_env_filter() -> EnvFilter {
    if let Ok(spec) = std::env::var("CBOX_LOG") {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| {
            eprintln!("Invalid CBOX_LOG filter '{}', using '{}'", spec, DEFAULT_FILTER);
            EnvFilter::new(DEFAULT_FILTER)
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
