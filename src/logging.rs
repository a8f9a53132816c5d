// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup for host applications.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, DEFAULT_LOG_FILTER};

/// Install a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Returns `false`
/// if a subscriber was already installed, so calling it twice is harmless.
pub fn init(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected_quietly() {
        let _ = init(LogFormat::Pretty);
        assert!(!init(LogFormat::Json));
    }
}
