// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pushbridge platform bridge.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BridgeError, Result};

// ---------------------------------------------------------------------------
// Push registration
// ---------------------------------------------------------------------------

/// Opaque push-registration token issued by the OS push service.
///
/// "No token" is `Option::<PushToken>::None`, never an empty `PushToken`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Normalise a raw OS token. Empty or whitespace-only input means the
    /// OS has no token to offer and maps to `None`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix suitable for log lines.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}…({} chars)", self.0.chars().count())
    }
}

/// Notification authorisation scope requested from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionScope {
    /// Alert / banner presentation.
    pub alert: bool,
    /// App icon badge.
    pub badge: bool,
    pub sound: bool,
}

impl PermissionScope {
    /// The one scope this bridge ever asks for.
    pub const REQUESTED: Self = Self {
        alert: true,
        badge: true,
        sound: true,
    };
}

// ---------------------------------------------------------------------------
// Notification delivery
// ---------------------------------------------------------------------------

/// Unique identifier for a delivered notification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The situation a notification reached the app in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryContext {
    /// Delivered while the app was on screen.
    Foreground,
    /// Delivered as background data while the app was not on screen.
    Background,
    /// The user tapped the notification, whatever state the app was in.
    TapActivated,
}

/// Notification payload. Opaque to the bridge and passed through untouched.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The single normalised event shape handed to the business layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub id: EventId,
    pub context: DeliveryContext,
    pub payload: Payload,
    pub received_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(payload: Payload, context: DeliveryContext) -> Self {
        Self {
            id: EventId::new(),
            context,
            payload,
            received_at: Utc::now(),
        }
    }
}

/// Presentation style requested for a notification shown while foregrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationStyle {
    /// Banner plus notification-list entry (OS 14 and later).
    Banner,
    /// Legacy alert style.
    Alert,
}

/// Completion value for the OS "will present" callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOptions {
    pub style: PresentationStyle,
    pub sound: bool,
}

impl PresentationOptions {
    /// Richest style the tier supports. Sound is always requested.
    pub fn for_tier(tier: CapabilityTier) -> Self {
        let style = match tier {
            CapabilityTier::Modern => PresentationStyle::Banner,
            CapabilityTier::Legacy => PresentationStyle::Alert,
        };
        Self { style, sound: true }
    }
}

/// Completion value for the OS background-delivery callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchResult {
    NewData,
    NoData,
    Failed,
}

// ---------------------------------------------------------------------------
// Network identity
// ---------------------------------------------------------------------------

/// Point-in-time list of Wi-Fi network names (SSIDs).
///
/// Never "null": no networks is the empty list. On the Modern tier the OS
/// discloses at most one network, so callers must not assume multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkQueryResult(Vec<String>);

impl NetworkQueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ssids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for NetworkQueryResult {
    fn from(ssids: Vec<String>) -> Self {
        Self(ssids)
    }
}

impl IntoIterator for NetworkQueryResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ---------------------------------------------------------------------------
// OS capability tiers
// ---------------------------------------------------------------------------

/// Running OS version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `"14"`, `"14.2"` or `"14.2.1"`.
    pub fn parse(s: &str) -> Result<Self> {
        let bad = || BridgeError::VersionParse(s.to_string());

        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| bad()))
            .collect::<Result<Vec<_>>>()?;

        match parts.as_slice() {
            [major] => Ok(Self::new(*major, 0, 0)),
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// OS-version-dependent feature bucket deciding which query strategy and
/// presentation style are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityTier {
    /// Sandboxed hotspot API; single current network, banner presentation.
    Modern,
    /// Per-interface captive-network enumeration, alert presentation.
    Legacy,
}

impl CapabilityTier {
    /// First OS major version on the Modern tier.
    pub const MODERN_MIN_MAJOR: u32 = 14;

    pub fn for_version(version: OsVersion) -> Self {
        if version.major >= Self::MODERN_MIN_MAJOR {
            Self::Modern
        } else {
            Self::Legacy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_normalise_to_none() {
        assert_eq!(PushToken::new(""), None);
        assert_eq!(PushToken::new("   "), None);
        assert_eq!(PushToken::new("abc").map(|t| t.as_str().to_owned()), Some("abc".into()));
    }

    #[test]
    fn redacted_token_hides_the_tail() {
        let token = PushToken::new("fGx81kq0:APA91bHsecret").unwrap();
        let shown = token.redacted();
        assert!(shown.starts_with("fGx81k"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn version_parsing() {
        assert_eq!(OsVersion::parse("14").unwrap(), OsVersion::new(14, 0, 0));
        assert_eq!(OsVersion::parse("13.7").unwrap(), OsVersion::new(13, 7, 0));
        assert_eq!(OsVersion::parse(" 17.4.1 ").unwrap(), OsVersion::new(17, 4, 1));
        assert!(OsVersion::parse("").is_err());
        assert!(OsVersion::parse("17.x").is_err());
        assert!(OsVersion::parse("1.2.3.4").is_err());
    }

    #[test]
    fn tier_boundary_is_major_fourteen() {
        assert_eq!(CapabilityTier::for_version(OsVersion::new(13, 7, 9)), CapabilityTier::Legacy);
        assert_eq!(CapabilityTier::for_version(OsVersion::new(14, 0, 0)), CapabilityTier::Modern);
        assert_eq!(CapabilityTier::for_version(OsVersion::new(18, 1, 0)), CapabilityTier::Modern);
    }

    #[test]
    fn presentation_always_requests_sound() {
        let modern = PresentationOptions::for_tier(CapabilityTier::Modern);
        let legacy = PresentationOptions::for_tier(CapabilityTier::Legacy);
        assert_eq!(modern.style, PresentationStyle::Banner);
        assert_eq!(legacy.style, PresentationStyle::Alert);
        assert!(modern.sound && legacy.sound);
    }

    #[test]
    fn requested_scope_is_alert_badge_sound() {
        let scope = PermissionScope::REQUESTED;
        assert!(scope.alert && scope.badge && scope.sound);
    }

    #[test]
    fn notification_event_keeps_payload_verbatim() {
        let mut payload = Payload::new();
        payload.insert("aps".into(), serde_json::json!({ "alert": "hi", "badge": 3 }));
        payload.insert("custom".into(), serde_json::json!([1, 2, 3]));

        let event = NotificationEvent::new(payload.clone(), DeliveryContext::Background);
        assert_eq!(event.payload, payload);
        assert_eq!(event.context, DeliveryContext::Background);
    }
}
