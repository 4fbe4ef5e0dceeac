// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the mobile OS APIs are unavailable.
//
// Every capability returns `CapabilityUnavailable`; the real implementation
// lives in the `ios` module.

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::{OsVersion, PermissionScope};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

fn unavailable(what: &str) -> BridgeError {
    BridgeError::CapabilityUnavailable(format!("{what} (stub bridge)"))
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl SystemVersion for StubBridge {
    fn os_version(&self) -> Result<OsVersion> {
        Err(unavailable("OS version"))
    }
}

impl HotspotScan for StubBridge {
    fn fetch_current_network(&self, _completion: ScanCompletion) -> Result<()> {
        tracing::warn!("HotspotScan::fetch_current_network called on stub bridge");
        Err(unavailable("hotspot scan"))
    }
}

impl CaptiveNetwork for StubBridge {
    fn supported_interfaces(&self) -> Result<Vec<String>> {
        tracing::warn!("CaptiveNetwork::supported_interfaces called on stub bridge");
        Err(unavailable("captive network interfaces"))
    }

    fn current_network_info(&self, _interface: &str) -> Result<Option<CaptiveNetworkInfo>> {
        Err(unavailable("captive network info"))
    }
}

impl PushRegistration for StubBridge {
    fn request_authorization(&self, _scope: PermissionScope) -> Result<()> {
        tracing::warn!("PushRegistration::request_authorization called on stub bridge");
        Err(unavailable("notification authorisation"))
    }

    fn register_for_remote_notifications(&self) -> Result<()> {
        Err(unavailable("remote notifications"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_capability_is_a_gap() {
        let stub = StubBridge;
        assert!(stub.os_version().unwrap_err().is_capability_gap());
        assert!(stub.supported_interfaces().unwrap_err().is_capability_gap());
        assert!(stub.current_network_info("en0").unwrap_err().is_capability_gap());
        assert!(
            stub.fetch_current_network(Box::new(|_| {}))
                .unwrap_err()
                .is_capability_gap()
        );
        assert!(
            stub.request_authorization(PermissionScope::REQUESTED)
                .unwrap_err()
                .is_capability_gap()
        );
    }

    #[test]
    fn platform_bridge_on_desktop_is_the_stub() {
        assert_eq!(crate::platform_bridge().platform_name(), "Desktop (stub)");
    }
}
