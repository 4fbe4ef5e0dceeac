// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability tier resolution. Read fresh on every call, never cached.

use tracing::debug;

use pushbridge_core::CapabilityTier;
use pushbridge_core::error::Result;
use pushbridge_native::traits::SystemVersion;

/// Resolve the tier of the running OS.
pub fn resolve_tier<P: SystemVersion + ?Sized>(platform: &P) -> Result<CapabilityTier> {
    let version = platform.os_version()?;
    let tier = CapabilityTier::for_version(version);
    debug!(%version, ?tier, "capability tier resolved");
    Ok(tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlatform, LEGACY, MODERN};

    #[test]
    fn follows_the_current_os_version() {
        let fake = FakePlatform::new(Some(LEGACY));
        assert_eq!(resolve_tier(&fake).unwrap(), CapabilityTier::Legacy);

        fake.set_version(Some(MODERN));
        assert_eq!(resolve_tier(&fake).unwrap(), CapabilityTier::Modern);
    }

    #[test]
    fn unknown_version_is_a_capability_gap() {
        let fake = FakePlatform::new(None);
        assert!(resolve_tier(&fake).unwrap_err().is_capability_gap());
    }
}
