//! Simple test infrastructure for basic testing
//!
//! This provides a minimal test setup that can work without external services

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("RelayBot=debug")
            .with_test_writer()
            .try_init();
    });
}

pub fn test_user_id() -> &'static str {
    "987654321"
}

pub fn other_user_id() -> &'static str {
    "123456789"
}
