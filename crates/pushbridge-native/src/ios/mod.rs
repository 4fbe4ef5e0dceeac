// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). This module is cfg-gated to
// `target_os = "ios"` and will not compile on other platforms.
//
// Unsafe code in this module falls into three categories:
//
// 1. **Toll-free bridging**: CFArray/CFDictionary/CFString values returned by
//    CaptiveNetwork are reinterpreted as NSArray/NSDictionary/NSString.
//
// 2. **ObjC message sends** (msg_send!): NetworkExtension and
//    UserNotifications are looked up at runtime so that a missing class maps
//    to `CapabilityUnavailable` instead of a link failure.
//
// 3. **SystemConfiguration C FFI** (CNCopySupportedInterfaces,
//    CNCopyCurrentNetworkInfo): Copy-rule functions returning +1 references.

use std::sync::{Mutex, PoisonError};

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject, Bool};
use objc2::{MainThreadMarker, msg_send};
use objc2_foundation::{NSArray, NSDictionary, NSProcessInfo, NSString};
use objc2_ui_kit::UIApplication;

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::{OsVersion, PermissionScope};

use crate::traits::*;

// ---------------------------------------------------------------------------
// SystemConfiguration FFI (CaptiveNetwork)
// ---------------------------------------------------------------------------

#[link(name = "SystemConfiguration", kind = "framework")]
unsafe extern "C" {
    /// `CFArrayRef _Nullable CNCopySupportedInterfaces(void);`
    fn CNCopySupportedInterfaces() -> *mut NSArray<NSString>;

    /// `CFDictionaryRef _Nullable CNCopyCurrentNetworkInfo(CFStringRef interfaceName);`
    fn CNCopyCurrentNetworkInfo(
        interface_name: &NSString,
    ) -> *mut NSDictionary<NSString, AnyObject>;

    static kCNNetworkInfoKeySSID: &'static NSString;
}

// Classes below are resolved at runtime; these empty blocks only pull the
// frameworks into the link.
#[link(name = "NetworkExtension", kind = "framework")]
unsafe extern "C" {}

#[link(name = "UserNotifications", kind = "framework")]
unsafe extern "C" {}

/// `UNAuthorizationOptions` bits.
const UN_AUTHORIZATION_OPTION_BADGE: usize = 1 << 0;
const UN_AUTHORIZATION_OPTION_SOUND: usize = 1 << 1;
const UN_AUTHORIZATION_OPTION_ALERT: usize = 1 << 2;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| BridgeError::Platform("must be called from the main thread".into()))
}

fn runtime_class(name: &'static std::ffi::CStr) -> Result<&'static AnyClass> {
    AnyClass::get(name).ok_or_else(|| {
        BridgeError::CapabilityUnavailable(format!("{} is not available", name.to_string_lossy()))
    })
}

fn string_for_key(dict: &NSDictionary<NSString, AnyObject>, key: &NSString) -> Option<String> {
    let value = dict.objectForKey(key)?;
    value.downcast::<NSString>().ok().map(|s| s.to_string())
}

fn authorization_options(scope: PermissionScope) -> usize {
    let mut options = 0;
    if scope.badge {
        options |= UN_AUTHORIZATION_OPTION_BADGE;
    }
    if scope.sound {
        options |= UN_AUTHORIZATION_OPTION_SOUND;
    }
    if scope.alert {
        options |= UN_AUTHORIZATION_OPTION_ALERT;
    }
    options
}

// ---------------------------------------------------------------------------
// IosBridge
// ---------------------------------------------------------------------------

/// Concrete iOS platform bridge.
///
/// `register_for_remote_notifications` requires the main thread. Everything
/// else may be called from any thread.
pub struct IosBridge;

impl IosBridge {
    /// Create a new iOS bridge instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

impl SystemVersion for IosBridge {
    fn os_version(&self) -> Result<OsVersion> {
        let version = NSProcessInfo::processInfo().operatingSystemVersion();
        let part = |n: isize| u32::try_from(n).unwrap_or(0);
        Ok(OsVersion::new(
            part(version.majorVersion),
            part(version.minorVersion),
            part(version.patchVersion),
        ))
    }
}

// ---------------------------------------------------------------------------
// HotspotScan -- NEHotspotNetwork (iOS 14+)
// ---------------------------------------------------------------------------

impl HotspotScan for IosBridge {
    /// Issue `+[NEHotspotNetwork fetchCurrentWithCompletionHandler:]`.
    ///
    /// One request, one answer. No hotspot-helper registration is made, so
    /// nothing keeps scanning after the completion fires.
    fn fetch_current_network(&self, completion: ScanCompletion) -> Result<()> {
        let class = runtime_class(c"NEHotspotNetwork")?;

        tracing::debug!("iOS: NEHotspotNetwork fetchCurrent");

        // The block is `Fn`, the completion `FnOnce`.
        let completion = Mutex::new(Some(completion));
        let block = RcBlock::new(move |network: *mut AnyObject| {
            // SAFETY: the OS passes either nil or a valid NEHotspotNetwork
            // that outlives this call.
            let ssid = unsafe { network.as_ref() }.and_then(|network| {
                // SAFETY: `SSID` is an NSString property on NEHotspotNetwork.
                let ssid: Option<Retained<NSString>> = unsafe { msg_send![network, SSID] };
                ssid.map(|s| s.to_string())
            });

            let done = completion
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(done) = done {
                done(ssid);
            }
        });

        // SAFETY: documented class method taking a `void (^)(NEHotspotNetwork *)`
        // block. The block is copied by the runtime before this returns.
        unsafe {
            let _: () = msg_send![class, fetchCurrentWithCompletionHandler: &*block];
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CaptiveNetwork -- SystemConfiguration (pre-iOS 14)
// ---------------------------------------------------------------------------

impl CaptiveNetwork for IosBridge {
    fn supported_interfaces(&self) -> Result<Vec<String>> {
        // SAFETY: Copy-rule function; the returned CFArray of CFStrings is a
        // +1 reference, toll-free bridged with NSArray<NSString>.
        let interfaces = unsafe { Retained::from_raw(CNCopySupportedInterfaces()) }.ok_or_else(
            || BridgeError::CapabilityUnavailable("CNCopySupportedInterfaces returned NULL".into()),
        )?;

        Ok(interfaces.iter().map(|name| name.to_string()).collect())
    }

    fn current_network_info(&self, interface: &str) -> Result<Option<CaptiveNetworkInfo>> {
        let name = NSString::from_str(interface);

        // SAFETY: Copy-rule function; the returned CFDictionary is a +1
        // reference, toll-free bridged with NSDictionary.
        let Some(info) = (unsafe { Retained::from_raw(CNCopyCurrentNetworkInfo(&name)) }) else {
            return Ok(None);
        };

        // SAFETY: SystemConfiguration constant CFString, valid for the
        // process lifetime.
        let ssid_key = unsafe { kCNNetworkInfoKeySSID };

        Ok(Some(CaptiveNetworkInfo {
            ssid: string_for_key(&info, ssid_key),
        }))
    }
}

// ---------------------------------------------------------------------------
// PushRegistration -- UNUserNotificationCenter / UIApplication
// ---------------------------------------------------------------------------

impl PushRegistration for IosBridge {
    fn request_authorization(&self, scope: PermissionScope) -> Result<()> {
        let class = runtime_class(c"UNUserNotificationCenter")?;
        let options = authorization_options(scope);

        tracing::info!(options, "iOS: requesting notification authorisation");

        let block = RcBlock::new(|granted: Bool, _error: *mut AnyObject| {
            tracing::info!(granted = granted.as_bool(), "iOS: notification authorisation answered");
        });

        // SAFETY: `currentNotificationCenter` and
        // `requestAuthorizationWithOptions:completionHandler:` are documented
        // UserNotifications selectors; the options value is an NSUInteger.
        unsafe {
            let center: Retained<AnyObject> = msg_send![class, currentNotificationCenter];
            let _: () = msg_send![
                &center,
                requestAuthorizationWithOptions: options,
                completionHandler: &*block
            ];
        }
        Ok(())
    }

    fn register_for_remote_notifications(&self) -> Result<()> {
        let mtm = require_main_thread()?;
        let app = UIApplication::sharedApplication(mtm);

        tracing::info!("iOS: registering for remote notifications");

        // SAFETY: documented UIApplication selector; main thread checked above.
        unsafe {
            let _: () = msg_send![&app, registerForRemoteNotifications];
        }
        Ok(())
    }
}
