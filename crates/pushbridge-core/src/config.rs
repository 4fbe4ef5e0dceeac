// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime settings for the bridge.
///
/// The requested notification permission scope is intentionally absent: it
/// is fixed at [`PermissionScope::REQUESTED`](crate::PermissionScope::REQUESTED).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the business-layer message channel.
    pub channel_name: String,
    /// Upper bound on how long a Modern-tier network scan may wait for the OS.
    pub network_query_timeout_ms: u64,
    /// Capacity of the outward event channel. Subscribers further behind
    /// than this skip the oldest events.
    pub event_buffer: usize,
    /// Capacity of the inbound command queue.
    pub command_buffer: usize,
}

impl BridgeConfig {
    /// Largest buffer either channel is built with.
    pub const MAX_CHANNEL_BUFFER: usize = 4096;

    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn network_query_timeout(&self) -> Duration {
        Duration::from_millis(self.network_query_timeout_ms)
    }

    /// `event_buffer` bounded to `1..=MAX_CHANNEL_BUFFER`.
    pub fn event_capacity(&self) -> usize {
        clamp_buffer(self.event_buffer)
    }

    /// `command_buffer` bounded to `1..=MAX_CHANNEL_BUFFER`.
    pub fn command_capacity(&self) -> usize {
        clamp_buffer(self.command_buffer)
    }
}

/// Channel constructors panic on zero or oversized capacities.
pub fn clamp_buffer(requested: usize) -> usize {
    requested.clamp(1, BridgeConfig::MAX_CHANNEL_BUFFER)
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: "pushbridge/platform".into(),
            network_query_timeout_ms: 3_000,
            event_buffer: 64,
            command_buffer: 32,
        }
    }
}
