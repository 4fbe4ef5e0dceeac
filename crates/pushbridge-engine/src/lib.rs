// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pushbridge — event dispatch and state reconciliation between the OS and
// the application business layer.
//
// Components, leaves first: network query adapter, token broker,
// notification router, and the dispatcher that fronts them.

pub mod dispatch;
pub mod events;
pub mod network;
pub mod notify;
pub mod tier;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{BridgeDispatcher, DispatcherHandle};
pub use events::{EventSink, EventSubscription};
pub use network::{LegacyEnumeration, ModernScan, NetworkQueryAdapter, NetworkQueryStrategy};
pub use notify::{NotificationRouter, classify_delivery};
pub use token::TokenBroker;

use tracing_subscriber::EnvFilter;

/// Install the `tracing` subscriber the embedding host logs through.
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
        tracing::info!("tracing installed");
    }
}
