#![allow(unused_crate_dependencies, clippy::panic)]

pub mod fixtures;
pub mod suite;

use std::sync::OnceLock;
use tokio::runtime::Runtime;

pub use suite::{Suite, SuiteError};

#[ctor::ctor]
fn setup_logging() {
    let filter = tracing_subscriber::filter::EnvFilter::builder()
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or("social_harness_backend=debug".to_string()));
    // several test binaries may share the process of a runner
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .without_time()
        .try_init();
}

pub fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    })
}
