// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scriptable OS collaborator for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::{OsVersion, PermissionScope};
use pushbridge_native::traits::*;

pub(crate) const MODERN: OsVersion = OsVersion::new(17, 4, 0);
pub(crate) const LEGACY: OsVersion = OsVersion::new(13, 7, 0);

/// How the fake answers a hotspot scan.
pub(crate) enum Scan {
    Answer(Option<String>),
    /// Drop the completion without calling it.
    Drop,
    /// Keep the completion and never call it.
    Hang,
    Unavailable,
}

pub(crate) struct FakePlatform {
    version: Mutex<Option<OsVersion>>,
    scan: Mutex<Scan>,
    /// `None` means the OS refuses to enumerate interfaces.
    interfaces: Mutex<Option<Vec<(String, Option<String>)>>>,
    pending: Mutex<Vec<ScanCompletion>>,
    pub scan_requests: AtomicUsize,
    pub registration_calls: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new(version: Option<OsVersion>) -> Self {
        Self {
            version: Mutex::new(version),
            scan: Mutex::new(Scan::Unavailable),
            interfaces: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
            scan_requests: AtomicUsize::new(0),
            registration_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn modern(scan: Scan) -> Self {
        let fake = Self::new(Some(MODERN));
        *fake.scan.lock().unwrap() = scan;
        fake
    }

    pub fn legacy(interfaces: &[(&str, Option<&str>)]) -> Self {
        let fake = Self::new(Some(LEGACY));
        fake.set_interfaces(interfaces);
        fake
    }

    pub fn set_version(&self, version: Option<OsVersion>) {
        *self.version.lock().unwrap() = version;
    }

    pub fn set_scan(&self, scan: Scan) {
        *self.scan.lock().unwrap() = scan;
    }

    pub fn set_interfaces(&self, interfaces: &[(&str, Option<&str>)]) {
        let owned = interfaces
            .iter()
            .map(|(name, ssid)| (name.to_string(), ssid.map(str::to_string)))
            .collect();
        *self.interfaces.lock().unwrap() = Some(owned);
    }

    pub fn scan_requests(&self) -> usize {
        self.scan_requests.load(Ordering::SeqCst)
    }
}

impl PlatformBridge for FakePlatform {
    fn platform_name(&self) -> &str {
        "fake"
    }
}

impl SystemVersion for FakePlatform {
    fn os_version(&self) -> Result<OsVersion> {
        self.version
            .lock()
            .unwrap()
            .ok_or_else(|| BridgeError::CapabilityUnavailable("OS version".into()))
    }
}

impl HotspotScan for FakePlatform {
    fn fetch_current_network(&self, completion: ScanCompletion) -> Result<()> {
        self.scan_requests.fetch_add(1, Ordering::SeqCst);
        match &*self.scan.lock().unwrap() {
            Scan::Answer(ssid) => completion(ssid.clone()),
            Scan::Drop => drop(completion),
            Scan::Hang => self.pending.lock().unwrap().push(completion),
            Scan::Unavailable => {
                return Err(BridgeError::CapabilityUnavailable("hotspot scan".into()));
            }
        }
        Ok(())
    }
}

impl CaptiveNetwork for FakePlatform {
    fn supported_interfaces(&self) -> Result<Vec<String>> {
        self.interfaces
            .lock()
            .unwrap()
            .as_ref()
            .map(|list| list.iter().map(|(name, _)| name.clone()).collect())
            .ok_or_else(|| BridgeError::CapabilityUnavailable("interfaces".into()))
    }

    fn current_network_info(&self, interface: &str) -> Result<Option<CaptiveNetworkInfo>> {
        let interfaces = self.interfaces.lock().unwrap();
        let Some((_, ssid)) = interfaces
            .iter()
            .flatten()
            .find(|(name, _)| name == interface)
        else {
            return Err(BridgeError::Platform(format!("unknown interface {interface}")));
        };
        Ok(ssid.as_ref().map(|ssid| CaptiveNetworkInfo {
            ssid: Some(ssid.clone()),
        }))
    }
}

impl PushRegistration for FakePlatform {
    fn request_authorization(&self, scope: PermissionScope) -> Result<()> {
        self.registration_calls.lock().unwrap().push(format!(
            "authorize alert={} badge={} sound={}",
            scope.alert, scope.badge, scope.sound
        ));
        Ok(())
    }

    fn register_for_remote_notifications(&self) -> Result<()> {
        self.registration_calls.lock().unwrap().push("register".into());
        Ok(())
    }
}
