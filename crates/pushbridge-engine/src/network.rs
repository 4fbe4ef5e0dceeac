// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Current Wi-Fi network query.
//
// One strategy per capability tier behind `NetworkQueryStrategy`:
//
// - `ModernScan` issues a single sandboxed hotspot request and waits a
//   bounded time for the answer. The OS discloses at most one network here.
// - `LegacyEnumeration` walks the OS-reported interfaces synchronously and
//   keeps one SSID per interface that has one, in enumeration order.
//
// `NetworkQueryAdapter` picks the strategy from the tier of the running OS on
// every call and collapses every failure to the empty result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use pushbridge_core::error::Result;
use pushbridge_core::{CapabilityTier, NetworkQueryResult};
use pushbridge_native::traits::{CaptiveNetwork, CaptiveNetworkInfo, HotspotScan, SystemVersion};

use crate::tier::resolve_tier;

/// A way of asking the OS for the current network identity.
pub trait NetworkQueryStrategy {
    fn tier(&self) -> CapabilityTier;

    /// SSIDs in OS order. Errors are capability gaps or platform failures;
    /// the adapter turns both into an empty result.
    fn current_ssids(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

// ---------------------------------------------------------------------------
// Modern tier
// ---------------------------------------------------------------------------

pub struct ModernScan<'a, P: ?Sized> {
    platform: &'a P,
    timeout: Duration,
}

impl<'a, P: ?Sized> ModernScan<'a, P> {
    pub fn new(platform: &'a P, timeout: Duration) -> Self {
        Self { platform, timeout }
    }
}

impl<P: HotspotScan + Sync + ?Sized> NetworkQueryStrategy for ModernScan<'_, P> {
    fn tier(&self) -> CapabilityTier {
        CapabilityTier::Modern
    }

    fn current_ssids(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        async move {
            let (tx, rx) = oneshot::channel();
            self.platform.fetch_current_network(Box::new(move |ssid| {
                // The receiver is gone if the scan already timed out.
                let _ = tx.send(ssid);
            }))?;

            match tokio::time::timeout(self.timeout, rx).await {
                Ok(Ok(Some(ssid))) if !ssid.is_empty() => Ok(vec![ssid]),
                Ok(Ok(_)) => {
                    debug!("hotspot scan disclosed no network");
                    Ok(Vec::new())
                }
                Ok(Err(_)) => {
                    debug!("hotspot scan completion dropped without an answer");
                    Ok(Vec::new())
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        "hotspot scan did not answer in time"
                    );
                    Ok(Vec::new())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Legacy tier
// ---------------------------------------------------------------------------

pub struct LegacyEnumeration<'a, P: ?Sized> {
    platform: &'a P,
}

impl<'a, P: ?Sized> LegacyEnumeration<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        Self { platform }
    }
}

impl<P: CaptiveNetwork + ?Sized> LegacyEnumeration<'_, P> {
    fn enumerate(&self) -> Result<Vec<String>> {
        let interfaces = self.platform.supported_interfaces()?;
        let mut ssids = Vec::with_capacity(interfaces.len());

        for interface in &interfaces {
            match self.platform.current_network_info(interface) {
                Ok(Some(CaptiveNetworkInfo { ssid: Some(ssid) })) if !ssid.is_empty() => ssids.push(ssid),
                Ok(_) => debug!(interface = %interface, "interface has no network identity"),
                Err(e) => debug!(interface = %interface, error = %e, "skipping interface"),
            }
        }
        Ok(ssids)
    }
}

impl<P: CaptiveNetwork + Sync + ?Sized> NetworkQueryStrategy for LegacyEnumeration<'_, P> {
    fn tier(&self) -> CapabilityTier {
        CapabilityTier::Legacy
    }

    fn current_ssids(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        std::future::ready(self.enumerate())
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Tier-selecting front for the two strategies.
pub struct NetworkQueryAdapter<P: ?Sized> {
    platform: Arc<P>,
    timeout: Duration,
}

impl<P: ?Sized> Clone for NetworkQueryAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            timeout: self.timeout,
        }
    }
}

impl<P> NetworkQueryAdapter<P>
where
    P: SystemVersion + HotspotScan + CaptiveNetwork + Send + Sync + ?Sized,
{
    pub fn new(platform: Arc<P>, timeout: Duration) -> Self {
        Self { platform, timeout }
    }

    /// Snapshot of the current network identities. Never fails: any
    /// capability gap, platform error or unanswered scan yields the empty
    /// result. On the Modern tier the result holds at most one SSID.
    pub async fn query_current_network(&self) -> NetworkQueryResult {
        match self.try_query().await {
            Ok(result) => result,
            Err(e) if e.is_capability_gap() => {
                debug!(error = %e, "network query capability unavailable");
                NetworkQueryResult::empty()
            }
            Err(e) => {
                warn!(error = %e, "network query failed");
                NetworkQueryResult::empty()
            }
        }
    }

    async fn try_query(&self) -> Result<NetworkQueryResult> {
        let platform = &*self.platform;
        let ssids = match resolve_tier(platform)? {
            CapabilityTier::Modern => run(ModernScan::new(platform, self.timeout)).await?,
            CapabilityTier::Legacy => run(LegacyEnumeration::new(platform)).await?,
        };
        Ok(ssids.into())
    }
}

async fn run<S: NetworkQueryStrategy>(strategy: S) -> Result<Vec<String>> {
    let ssids = strategy.current_ssids().await?;
    debug!(tier = ?strategy.tier(), count = ssids.len(), "network query resolved");
    Ok(ssids)
}
