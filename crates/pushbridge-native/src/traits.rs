// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS collaborators the bridge
// depends on. Implementations report missing features as
// `BridgeError::CapabilityUnavailable`; the bridge core absorbs those.

use pushbridge_core::error::Result;
use pushbridge_core::{OsVersion, PermissionScope};

/// Completion handler for a hotspot scan. Receives the current network's
/// SSID, or `None` when the OS declines to disclose one.
pub type ScanCompletion = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// Unified bridge that groups all native capabilities.
///
/// Every entry point may be invoked from any OS callback context, hence the
/// `Send + Sync` bound.
pub trait PlatformBridge:
    SystemVersion + HotspotScan + CaptiveNetwork + PushRegistration + Send + Sync
{
    /// Human-readable platform name (e.g. "iOS", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Version of the running OS.
pub trait SystemVersion {
    fn os_version(&self) -> Result<OsVersion>;
}

/// Sandboxed current-network query (Modern tier).
pub trait HotspotScan {
    /// Ask the OS for the current Wi-Fi network.
    ///
    /// Returns once the request is issued. The OS answers later by calling
    /// `completion` at most once; it may also never answer, or drop the
    /// completion without calling it.
    fn fetch_current_network(&self, completion: ScanCompletion) -> Result<()>;
}

/// Per-interface captive-network information (Legacy tier).
pub trait CaptiveNetwork {
    /// Names of the network interfaces the OS reports, in OS order.
    fn supported_interfaces(&self) -> Result<Vec<String>>;

    /// Network information for one interface. `Ok(None)` if the interface
    /// is not associated with any network.
    fn current_network_info(&self, interface: &str) -> Result<Option<CaptiveNetworkInfo>>;
}

/// Push-notification authorisation and registration.
pub trait PushRegistration {
    /// Ask the user to authorise notifications with the given scope. The
    /// answer arrives asynchronously and is not reported back.
    fn request_authorization(&self, scope: PermissionScope) -> Result<()>;

    /// Register with the push service. The token arrives later through the
    /// registration callback.
    fn register_for_remote_notifications(&self) -> Result<()>;
}

/// What the OS discloses about the network on one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptiveNetworkInfo {
    pub ssid: Option<String>,
}
