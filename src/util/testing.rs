//! Shared test setup: logging and process-wide state isolation.

use std::env;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{data, registry};

static TEST_SETUP: Once = Once::new();
static GLOBAL_STATE: Mutex<()> = Mutex::new(());

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

/// Serialize tests touching the default data store or installed registry.
///
/// Both are cleared on acquisition, so every holder starts from empty.
pub fn isolate_global_state() -> MutexGuard<'static, ()> {
    let guard = GLOBAL_STATE.lock().unwrap_or_else(PoisonError::into_inner);
    data::reset_default_data();
    registry::reset();
    guard
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
