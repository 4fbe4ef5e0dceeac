// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Pushbridge — Native OS collaborator abstractions.
//!
//! This crate defines the traits through which the bridge core talks to the
//! operating system (version query, hotspot scan, captive-network
//! enumeration, push registration) and the per-platform implementations of
//! those traits.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(not(target_os = "ios"))]
pub mod stub;

use std::sync::Arc;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Arc<dyn traits::PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: NetworkExtension / CaptiveNetwork / UserNotifications via objc2.
        Arc::new(ios::IosBridge::new())
    }
    #[cfg(not(target_os = "ios"))]
    {
        // DESKTOP/CI: every capability reports itself unavailable.
        Arc::new(stub::StubBridge)
    }
}
