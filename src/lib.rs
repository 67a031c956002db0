#![doc(test(attr(deny(warnings))))]

//! Calcbook records binary arithmetic calculations per user and drives the
//! calculation service from an interactive or scripted command shell.

pub mod cli;
pub mod utils;

pub use calcbook_config as config;
pub use calcbook_core as core;
pub use calcbook_domain as domain;
pub use calcbook_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing once. `RUST_LOG` takes precedence over `filter`.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        if utils::init_tracing(filter) {
            tracing::info!("Calcbook tracing initialized.");
        }
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter("calcbook=debug");
    }

    #[test]
    fn subscriber_is_installed_only_once() {
        super::init();
        assert!(!super::utils::init_tracing("calcbook=debug"));
    }
}
