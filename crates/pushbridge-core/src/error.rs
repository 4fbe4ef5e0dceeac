// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pushbridge.
//
// A failed push registration is not an error here: it is an absent token.

use thiserror::Error;

/// Top-level error type for all Pushbridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Platform capabilities --
    #[error("capability not available on this OS tier: {0}")]
    CapabilityUnavailable(String),

    #[error("platform call failed: {0}")]
    Platform(String),

    #[error("unrecognised OS version string: {0:?}")]
    VersionParse(String),

    // -- Business-layer surface --
    #[error("unrecognised command: {0}")]
    UnrecognizedCommand(String),

    #[error("bridge dispatcher is not running")]
    DispatcherClosed,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether this error is an OS capability gap that callers are expected
    /// to absorb into a benign value instead of surfacing.
    pub fn is_capability_gap(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
