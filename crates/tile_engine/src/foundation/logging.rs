//! Logger setup
//!
//! Engine code only talks to the `log` facade. Hosts call [`init`] once;
//! tests call [`init_for_tests`] as often as they like.

pub use log::{debug, error, info, trace, warn};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Install `env_logger`, honouring `RUST_LOG` and falling back to [`DEFAULT_FILTER`]
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER)).init();
}

/// Install a test-captured logger; later calls are no-ops
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
