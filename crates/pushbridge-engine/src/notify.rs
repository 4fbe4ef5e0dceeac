// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Notification delivery router.
//
// The OS reports notifications through three differently shaped callbacks:
// "will present while foregrounded", "remote data received" and "user
// responded". The router collapses them into one `NotificationEvent` with a
// three-valued `DeliveryContext`, publishes it, and then releases the OS
// completion signal straight away. Nothing here waits: the OS enforces a
// deadline on the completion.

use std::sync::Arc;

use tracing::{debug, warn};

use pushbridge_core::{
    BridgeEvent, CapabilityTier, DeliveryContext, FetchResult, NotificationEvent, Payload,
    PresentationOptions,
};
use pushbridge_native::traits::SystemVersion;

use crate::events::EventSink;
use crate::tier::resolve_tier;

/// Context for a delivery that was not a tap.
pub fn classify_delivery(while_foreground: bool) -> DeliveryContext {
    if while_foreground {
        DeliveryContext::Foreground
    } else {
        DeliveryContext::Background
    }
}

pub struct NotificationRouter<P: ?Sized> {
    platform: Arc<P>,
    events: EventSink,
}

impl<P: SystemVersion + ?Sized> NotificationRouter<P> {
    pub fn new(platform: Arc<P>, events: EventSink) -> Self {
        Self { platform, events }
    }

    /// A notification arrived without user interaction.
    pub fn on_delivered(&self, payload: Payload, while_foreground: bool) -> NotificationEvent {
        self.route(payload, classify_delivery(while_foreground))
    }

    /// The user tapped a notification. Always `TapActivated`, whether the
    /// app was foregrounded, backgrounded or not running.
    pub fn on_activated(&self, payload: Payload) -> NotificationEvent {
        self.route(payload, DeliveryContext::TapActivated)
    }

    /// Richest presentation the running OS supports, with sound. Falls back
    /// to the legacy alert style when the OS version cannot be read.
    pub fn presentation_options(&self) -> PresentationOptions {
        let tier = resolve_tier(&*self.platform).unwrap_or_else(|e| {
            warn!(error = %e, "OS version unavailable; using legacy presentation");
            CapabilityTier::Legacy
        });
        PresentationOptions::for_tier(tier)
    }

    /// OS "will present" callback: the app is on screen.
    pub fn will_present<F>(&self, payload: Payload, completion: F) -> NotificationEvent
    where
        F: FnOnce(PresentationOptions),
    {
        let event = self.on_delivered(payload, true);
        completion(self.presentation_options());
        event
    }

    /// OS remote-data callback. The fetch result is always `NewData`.
    pub fn did_receive_remote<F>(
        &self,
        payload: Payload,
        while_foreground: bool,
        completion: F,
    ) -> NotificationEvent
    where
        F: FnOnce(FetchResult),
    {
        let event = self.on_delivered(payload, while_foreground);
        completion(FetchResult::NewData);
        event
    }

    /// OS "user responded" callback.
    pub fn did_receive_response<F>(&self, payload: Payload, completion: F) -> NotificationEvent
    where
        F: FnOnce(),
    {
        let event = self.on_activated(payload);
        completion();
        event
    }

    fn route(&self, payload: Payload, context: DeliveryContext) -> NotificationEvent {
        let event = NotificationEvent::new(payload, context);
        debug!(id = %event.id, ?context, keys = event.payload.len(), "notification routed");
        self.events.publish(BridgeEvent::Notification(event.clone()));
        event
    }
}
