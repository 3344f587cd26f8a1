//! Process-wide `tracing` setup for the `cfs-model` binary.
//!
//! One `tracing-subscriber` fmt layer writes to stderr, leaving stdout for
//! workload JSON and run summaries. Verbosity comes from `RUST_LOG` and
//! defaults to `info`; per-cycle detail is at `debug` and `trace`.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Install the global subscriber. Call once, before the first event.
pub fn init() {
    subscriber().init();
}

fn subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let stderr = layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    registry().with(stderr)
}
